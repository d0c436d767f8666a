//! Research aggregation error types.

/// Kinds of research errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ResearchErrorKind {
    /// A platform scraper failed; recorded as an outage, never fatal to a run
    #[display("Scraper unavailable for {}: {}", platform, reason)]
    ScraperUnavailable {
        /// Platform identifier (e.g. "reddit")
        platform: String,
        /// Failure detail
        reason: String,
    },
    /// Failed to read a cache entry
    #[display("Failed to read research cache: {}", _0)]
    CacheRead(String),
    /// Failed to write a cache entry
    #[display("Failed to write research cache: {}", _0)]
    CacheWrite(String),
}

/// Research error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ResearchError, ResearchErrorKind};
///
/// let err = ResearchError::new(ResearchErrorKind::ScraperUnavailable {
///     platform: "reddit".to_string(),
///     reason: "HTTP 503".to_string(),
/// });
/// assert!(format!("{}", err).contains("reddit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Research Error: {} at line {} in {}", kind, line, file)]
pub struct ResearchError {
    /// The kind of error that occurred
    pub kind: ResearchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ResearchError {
    /// Create a new research error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ResearchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
