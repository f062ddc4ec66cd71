//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, PublishError, StorageError};

/// Union of the error domains in the Fabula workspace.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, ConfigError};
///
/// let cfg_err = ConfigError::new("OPENAI_API_KEY is not set");
/// let err: FabulaError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Story state storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Text or image generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Messaging platform error
    #[from(PublishError)]
    Publish(PublishError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, StorageError, StorageErrorKind};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(StorageError::new(StorageErrorKind::FileRead("denied".to_string())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
