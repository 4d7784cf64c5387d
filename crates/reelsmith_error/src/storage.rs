//! Snapshot persistence error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the data directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a snapshot
    #[display("Failed to write snapshot: {}", _0)]
    Write(String),
    /// Failed to read a snapshot
    #[display("Failed to read snapshot: {}", _0)]
    Read(String),
    /// Failed to serialize a snapshot
    #[display("Failed to serialize snapshot: {}", _0)]
    Serialize(String),
    /// Failed to remove a snapshot
    #[display("Failed to remove snapshot: {}", _0)]
    Remove(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Read("tasks.json".to_string()));
/// assert!(format!("{}", err).contains("tasks.json"));
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
