//! Generation parameters.

use serde_json::Value;

/// Expected top-level shape of the parsed JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// A single JSON object
    #[default]
    Object,
    /// A JSON array
    Array,
}

impl ResponseShape {
    /// Whether the parsed value has this shape at the top level.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// Parameters for one dispatched generation.
///
/// # Examples
///
/// ```
/// use reelsmith_dispatch::{GenerateParams, ResponseShape};
///
/// let params = GenerateParams::builder()
///     .prompt("Write three hooks as a JSON array.")
///     .shape(ResponseShape::Array)
///     .temperature(0.8)
///     .build()
///     .unwrap();
/// assert_eq!(params.shape(), ResponseShape::Array);
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct GenerateParams {
    /// The user prompt
    prompt: String,
    /// Optional system message
    #[builder(default, setter(strip_option))]
    system: Option<String>,
    /// Sampling temperature
    #[builder(default, setter(strip_option))]
    temperature: Option<f32>,
    /// Completion token cap
    #[builder(default, setter(strip_option))]
    max_tokens: Option<u32>,
    /// Expected top-level response shape
    #[builder(default)]
    shape: ResponseShape,
}

impl GenerateParams {
    /// Returns a builder for generation parameters.
    pub fn builder() -> GenerateParamsBuilder {
        GenerateParamsBuilder::default()
    }

    /// The user prompt.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Optional system message.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Sampling temperature.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Completion token cap.
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Expected top-level response shape.
    pub fn shape(&self) -> ResponseShape {
        self.shape
    }
}
