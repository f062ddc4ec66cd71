//! Telegram channel publishing for the Fabula story publisher.
//!
//! The [`Publisher`] trait is the seam the orchestrator talks through: close
//! the previous audience poll, post the new scene (with an optional
//! illustration), open the next poll. [`TelegramPublisher`] implements it
//! over the Bot API; [`DryRunPublisher`] is the no-network stand-in used in
//! dry-run mode.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod publisher;
mod telegram;

pub use dry_run::DryRunPublisher;
pub use publisher::{PollOutcome, Publisher};
pub use telegram::TelegramPublisher;
