//! Telegram Bot API client.

mod client;
mod dto;
mod winner;

pub use client::TelegramPublisher;
