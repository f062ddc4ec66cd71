//! Generation error types covering the text and image providers.

/// Kinds of generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Provider request failed before a response arrived
    #[display("Provider request failed: {}", _0)]
    ApiRequest(String),
    /// Provider answered with a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message from the provider
        message: String,
    },
    /// Response did not invoke the forced tool
    #[display("Response did not call the '{}' tool", _0)]
    MissingToolCall(String),
    /// Tool arguments were not valid JSON for the expected schema
    #[display("Failed to parse tool arguments: {}", _0)]
    MalformedArguments(String),
    /// Provider returned an empty or whitespace-only continuation
    #[display("Provider returned an empty continuation")]
    EmptyContinuation,
    /// Poll option list had the wrong arity
    #[display("Expected {} poll options, got {}", expected, actual)]
    PollOptionCount {
        /// Required number of options
        expected: usize,
        /// Number actually returned
        actual: usize,
    },
    /// Poll options were not mutually distinct
    #[display("Poll options are not mutually distinct")]
    DuplicatePollOptions,
    /// Image payload could not be decoded
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Image provider returned no image data
    #[display("Image provider returned no image data")]
    MissingImage,
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::PollOptionCount {
///     expected: 4,
///     actual: 2,
/// });
/// assert!(format!("{}", err).contains("poll options"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
