//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Conversation roles recognized by chat-completion providers.
///
/// # Examples
///
/// ```
/// use fabula_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages carry the request payload
    User,
    /// Assistant messages are from the model
    Assistant,
}

impl Role {
    /// Wire-format name used by OpenAI-compatible endpoints.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
