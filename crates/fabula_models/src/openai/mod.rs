//! OpenAI-compatible chat-completion client.

mod client;
mod conversion;
mod dto;

pub use client::OpenAiChatClient;
