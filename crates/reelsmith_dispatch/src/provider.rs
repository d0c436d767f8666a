//! Provider identities and the completion seam.

use async_trait::async_trait;
use reelsmith_error::ProviderError;

/// The supported chat-completion providers.
///
/// All three speak the OpenAI chat-completions wire format and differ only
/// in base URL, default model, and JSON-mode support.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI chat completions
    #[strum(serialize = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
    /// DeepSeek chat completions
    #[strum(serialize = "deepseek")]
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// xAI Grok chat completions
    Grok,
}

impl ProviderKind {
    /// API base URL, without the `/chat/completions` suffix.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::DeepSeek => "https://api.deepseek.com/v1",
            Self::Grok => "https://api.x.ai/v1",
        }
    }

    /// Model used when the configuration does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::DeepSeek => "deepseek-chat",
            Self::Grok => "grok-2-latest",
        }
    }

    /// Whether the provider honors the `response_format: json_object` flag.
    ///
    /// Providers without it still produce JSON when prompted for it; the
    /// extraction layer handles the surrounding prose.
    pub fn supports_json_mode(&self) -> bool {
        match self {
            Self::OpenAi | Self::DeepSeek => true,
            Self::Grok => false,
        }
    }
}

/// A single completion request, provider-agnostic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    /// Optional system message prepended to the conversation
    pub system: Option<String>,
    /// The user prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completion token cap
    pub max_tokens: Option<u32>,
    /// Request structured JSON output where the provider supports it
    pub json_mode: bool,
}

/// Object-safe seam over a chat-completion backend.
///
/// [`crate::Dispatcher`] walks a list of these in fallback order. The real
/// implementation is [`crate::ChatClient`]; tests substitute mocks.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Runs one completion and returns the raw response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;

    /// Stable provider name used in logs and failure records.
    fn provider_name(&self) -> &str;

    /// Model this client sends requests to.
    fn model_name(&self) -> &str;
}
