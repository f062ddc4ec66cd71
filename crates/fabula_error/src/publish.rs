//! Publishing error types for the messaging platform.

/// Kinds of publishing errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PublishErrorKind {
    /// Request to the platform failed before a response arrived
    #[display("Telegram request failed: {}", _0)]
    Http(String),
    /// Platform rejected the request
    #[display("Telegram API error {}: {}", status_code, description)]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error description from the platform
        description: String,
    },
    /// Response body was missing an expected field
    #[display("Malformed Telegram response: {}", _0)]
    MalformedResponse(String),
}

/// Publishing error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{PublishError, PublishErrorKind};
///
/// let err = PublishError::new(PublishErrorKind::Api {
///     status_code: 403,
///     description: "bot was kicked from the channel".to_string(),
/// });
/// assert!(format!("{}", err).contains("403"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
