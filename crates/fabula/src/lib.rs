//! Fabula - automated interactive-fiction publisher.
//!
//! A scheduled job advances a serialized story by one step: an LLM writes the
//! next scene and four audience poll options, an image model optionally
//! renders an illustration, and everything is posted to a Telegram channel as
//! a message plus a poll. The winning option of the previous poll steers the
//! next step.
//!
//! # Architecture
//!
//! Fabula is organized as a workspace with focused crates:
//!
//! - `fabula_error` - Error types
//! - `fabula_core` - Chat data types and provider trait seams
//! - `fabula_storage` - Story state persistence
//! - `fabula_models` - Text and image provider clients
//! - `fabula_narrative` - Story continuation and poll generation
//! - `fabula_social` - Telegram channel publishing
//! - `fabula_bot` - Configuration and step orchestration
//!
//! This crate (`fabula`) re-exports everything for convenience and carries
//! the `fabula` binary that cron invokes once per story step.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use fabula_bot::{
    ImageProviderConfig, StepOutcome, StepPhase, StoryBotConfig, StoryStepRunner,
};
pub use fabula_core::{
    ChatDriver, ChatMessage, GenerateRequest, GenerateResponse, ImageRenderer, Output, Role,
    ToolCall, ToolSpec,
};
pub use fabula_error::{
    ConfigError, FabulaError, FabulaErrorKind, FabulaResult, GenerationError,
    GenerationErrorKind, PublishError, PublishErrorKind, StorageError, StorageErrorKind,
};
pub use fabula_models::{GeminiImageClient, OpenAiChatClient};
pub use fabula_narrative::{
    StoryGenerator, StoryLimits, StoryStep, POLL_OPTION_COUNT, POLL_OPTION_MAX_CHARS,
};
pub use fabula_social::{DryRunPublisher, PollOutcome, Publisher, TelegramPublisher};
pub use fabula_storage::{FileStateStore, MemoryStateStore, StateRepository, StoryState};
