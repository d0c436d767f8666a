//! Dispatch error types for the multi-provider generation layer.

/// A single provider's failure, recorded while walking the fallback order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}: {}", provider, reason)]
pub struct ProviderFailure {
    /// Provider name (e.g. "openai", "deepseek")
    pub provider: String,
    /// Human-readable failure reason
    pub reason: String,
}

impl ProviderFailure {
    /// Create a new provider failure record.
    pub fn new(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Kinds of dispatch errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DispatchErrorKind {
    /// Every configured provider was attempted and failed
    #[display("Generation unavailable: {} provider(s) failed", attempts.len())]
    GenerationUnavailable {
        /// One failure record per provider attempted, in fallback order
        attempts: Vec<ProviderFailure>,
    },
    /// A provider answered, but the response did not parse into the
    /// expected structured shape
    #[display("Malformed response from {}: {}", provider, reason)]
    MalformedResponse {
        /// Provider that produced the unparseable response
        provider: String,
        /// Parse failure detail
        reason: String,
    },
    /// The dispatcher was constructed with an empty provider list
    #[display("No providers configured")]
    NoProviders,
}

/// Dispatch error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{DispatchError, DispatchErrorKind, ProviderFailure};
///
/// let err = DispatchError::new(DispatchErrorKind::GenerationUnavailable {
///     attempts: vec![ProviderFailure::new("openai", "rate limited")],
/// });
/// assert!(format!("{}", err).contains("1 provider(s)"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    /// The kind of error that occurred
    pub kind: DispatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DispatchError {
    /// Create a new dispatch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
