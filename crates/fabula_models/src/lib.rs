//! Provider clients for the Fabula story publisher.
//!
//! Two external providers back a story step:
//!
//! - An OpenAI-compatible chat-completion endpoint generates story text,
//!   poll options, and image prompts ([`OpenAiChatClient`]).
//! - The Gemini imaging endpoint renders an illustration from a derived
//!   prompt ([`GeminiImageClient`]).
//!
//! Both are thin `reqwest` clients: request conversion in, status check,
//! response conversion out. Neither retries; a failed call surfaces as a
//! `GenerationError` and aborts the current step.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod openai;

pub use gemini::GeminiImageClient;
pub use openai::OpenAiChatClient;
