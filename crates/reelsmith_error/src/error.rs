//! Top-level error wrapper types.

use crate::{
    ConfigError, DispatchError, JobError, PersonaError, PipelineError, ProviderError,
    ResearchError, StorageError,
};

/// Workspace-wide error enum.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithError, ConfigError};
///
/// let cfg_err = ConfigError::new("missing field");
/// let err: ReelsmithError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelsmithErrorKind {
    /// Provider-level failure (network, rate limit, auth)
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Dispatch-level failure (fallback exhausted, malformed response)
    #[from(DispatchError)]
    Dispatch(DispatchError),
    /// Research aggregation failure
    #[from(ResearchError)]
    Research(ResearchError),
    /// Persona store failure
    #[from(PersonaError)]
    Persona(PersonaError),
    /// Persistence failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Pipeline stage failure
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Background job failure
    #[from(JobError)]
    Job(JobError),
    /// Configuration failure
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Reelsmith error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithResult, PersonaError, PersonaErrorKind};
///
/// fn might_fail() -> ReelsmithResult<()> {
///     Err(PersonaError::new(PersonaErrorKind::NotFound("x".to_string())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelsmith Error: {}", _0)]
pub struct ReelsmithError(Box<ReelsmithErrorKind>);

impl ReelsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelsmithErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ReelsmithErrorKind
impl<T> From<T> for ReelsmithError
where
    T: Into<ReelsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reelsmith operations.
pub type ReelsmithResult<T> = std::result::Result<T, ReelsmithError>;
