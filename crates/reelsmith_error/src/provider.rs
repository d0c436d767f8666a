//! Provider error types for LLM API clients.

/// Kinds of provider errors.
///
/// The transient/fatal split drives the dispatch layer's retry policy:
/// transient failures are retried within a provider before falling back,
/// fatal failures skip straight to the next provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Network-level failure (connect, DNS, TLS, dropped connection)
    #[display("Network error: {}", _0)]
    Network(String),
    /// Request timed out before the provider responded
    #[display("Request timed out after {}s", _0)]
    Timeout(u64),
    /// Provider returned a rate-limit response (HTTP 429)
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Provider returned a 5xx-class response
    #[display("Server error ({}): {}", status, message)]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body or summary
        message: String,
    },
    /// Authentication or authorization failure (HTTP 401/403)
    #[display("Authentication failed ({}): {}", status, message)]
    Auth {
        /// HTTP status code
        status: u16,
        /// Response body or summary
        message: String,
    },
    /// The request itself was rejected as malformed (HTTP 400/404/422)
    #[display("Malformed request ({}): {}", status, message)]
    MalformedRequest {
        /// HTTP status code
        status: u16,
        /// Response body or summary
        message: String,
    },
    /// The response body could not be deserialized from the wire format
    #[display("Failed to decode provider response: {}", _0)]
    Decode(String),
    /// The response contained no usable completion text
    #[display("Provider response contained no choices")]
    EmptyResponse,
}

impl ProviderErrorKind {
    /// Whether this failure is worth retrying against the same provider.
    ///
    /// Network errors, timeouts, rate limits and 5xx responses are
    /// transient; auth and request-shape failures are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::Timeout(_)
                | Self::RateLimited(_)
                | Self::ServerError { .. }
        )
    }
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::RateLimited("retry in 20s".to_string()));
/// assert!(err.kind.is_transient());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the underlying failure is transient.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}
