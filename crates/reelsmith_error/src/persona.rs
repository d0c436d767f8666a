//! Persona store error types.

/// Kinds of persona errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersonaErrorKind {
    /// No persona file exists for the given id
    #[display("Persona not found: {}", _0)]
    NotFound(String),
    /// Persona file exists but could not be deserialized
    #[display("Invalid persona file for '{}': {}", id, reason)]
    InvalidFile {
        /// Persona id
        id: String,
        /// Deserialization failure detail
        reason: String,
    },
    /// A persona id contains characters unsafe for a filename
    #[display("Invalid persona id: {}", _0)]
    InvalidId(String),
    /// A persona with this id already exists; creation never overwrites
    #[display("Persona already exists: {}", _0)]
    AlreadyExists(String),
    /// A reel id does not exist in the persona's history
    #[display("Reel '{}' not found in persona '{}'", reel_id, persona_id)]
    ReelNotFound {
        /// Persona id
        persona_id: String,
        /// Reel id
        reel_id: String,
    },
}

/// Persona error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{PersonaError, PersonaErrorKind};
///
/// let err = PersonaError::new(PersonaErrorKind::NotFound("sat_coach".to_string()));
/// assert!(format!("{}", err).contains("sat_coach"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persona Error: {} at line {} in {}", kind, line, file)]
pub struct PersonaError {
    /// The kind of error that occurred
    pub kind: PersonaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersonaError {
    /// Create a new persona error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersonaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
