//! Generation pipeline error types.

/// Kinds of pipeline errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The ideation stage failed after every provider fallback; fatal to
    /// the run since no downstream work is possible without ideas
    #[display("Ideation failed: {}", _0)]
    IdeationFailed(String),
    /// The ideation call succeeded but produced no parseable ideas
    #[display("Ideation produced no usable ideas: {}", _0)]
    NoIdeas(String),
    /// The insight analysis call answered but produced nothing usable
    #[display("Insight analysis failed: {}", _0)]
    InsightAnalysis(String),
    /// A review action referenced an item that does not exist in the run
    #[display("Review target not found: {}", _0)]
    ReviewTargetNotFound(String),
    /// A prompt template could not be loaded or rendered
    #[display("Prompt template error: {}", _0)]
    PromptTemplate(String),
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::IdeationFailed("all providers down".to_string()));
/// assert!(format!("{}", err).contains("Ideation failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
