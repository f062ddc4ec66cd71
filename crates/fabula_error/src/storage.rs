//! Storage error types for the persisted story state.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the state directory
    #[display("Failed to create state directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to read the state file
    #[display("Failed to read state file: {}", _0)]
    FileRead(String),
    /// Failed to write the state file
    #[display("Failed to write state file: {}", _0)]
    FileWrite(String),
    /// State file exists but does not parse as a story record
    #[display("Corrupt state file: {}", _0)]
    Corrupt(String),
    /// Failed to serialize the story record
    #[display("Failed to serialize state: {}", _0)]
    Serialize(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Corrupt("unexpected EOF".to_string()));
/// assert!(format!("{}", err).contains("Corrupt"));
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
