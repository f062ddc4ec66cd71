//! Story continuation and poll generation for the Fabula story publisher.
//!
//! The [`StoryGenerator`] wraps a [`fabula_core::ChatDriver`] and turns the
//! running story context plus the audience's last poll choice into the next
//! story segment, a fresh set of poll options, and (when an illustration is
//! wanted) a visual prompt. All structured output is obtained through forced
//! tool calls so malformed provider responses surface as errors instead of
//! leaking into the channel.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod generator;
mod prompts;
mod step;

pub use context::{count_sentences, truncate_context};
pub use generator::{StoryGenerator, StoryLimits};
pub use step::StoryStep;

/// Number of choices every audience poll must offer.
pub const POLL_OPTION_COUNT: usize = 4;

/// Longest poll option the messaging platform renders cleanly.
pub const POLL_OPTION_MAX_CHARS: usize = 90;
