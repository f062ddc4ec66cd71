//! Error types for the Fabula story publisher.
//!
//! This crate provides the foundation error types used throughout the Fabula
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabula_error::{FabulaResult, ConfigError};
//!
//! fn read_setting() -> FabulaResult<String> {
//!     Err(ConfigError::new("BOT_TOKEN is not set"))?
//! }
//!
//! match read_setting() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod publish;
mod storage;

pub use config::ConfigError;
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use publish::{PublishError, PublishErrorKind};
pub use storage::{StorageError, StorageErrorKind};
