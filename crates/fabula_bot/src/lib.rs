//! Step orchestration for the Fabula story publisher.
//!
//! One process invocation runs one story step: load the persisted state,
//! close the previous audience poll, generate the next scene and poll
//! options, render an optional illustration, publish, save. The external
//! scheduler (cron) decides the cadence; nothing here loops.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod step;

pub use config::{ImageProviderConfig, StoryBotConfig};
pub use step::{StepOutcome, StepPhase, StoryStepRunner};
