//! Storage error types for persisted runs, personas, and cache entries.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read a file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Entity not found at the expected location
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Failed to serialize an entity for persistence
    #[display("Serialization failed: {}", _0)]
    Serialization(String),
    /// Failed to deserialize a persisted entity
    #[display("Deserialization failed: {}", _0)]
    Deserialization(String),
}

/// Storage error with location tracking.
///
/// Persistence failures are fatal to the enclosing run or job: output is
/// not considered complete without a durable record.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("runs/2025-01-01.json".to_string()));
/// assert!(format!("{}", err).contains("Not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
