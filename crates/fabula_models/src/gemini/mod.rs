//! Gemini image synthesis client.

mod client;
mod dto;

pub use client::GeminiImageClient;
