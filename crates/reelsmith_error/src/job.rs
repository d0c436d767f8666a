//! Background job engine error types.

/// Kinds of job errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum JobErrorKind {
    /// The job queue has been closed; no further jobs can be enqueued
    #[display("Job queue closed")]
    QueueClosed,
}

/// Job error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{JobError, JobErrorKind};
///
/// let err = JobError::new(JobErrorKind::QueueClosed);
/// assert!(format!("{}", err).contains("queue closed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Job Error: {} at line {} in {}", kind, line, file)]
pub struct JobError {
    /// The kind of error that occurred
    pub kind: JobErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl JobError {
    /// Create a new job error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: JobErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
