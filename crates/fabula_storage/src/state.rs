//! The persisted story record.

use serde::{Deserialize, Serialize};

/// Running state of one serialized story.
///
/// Exactly one record exists per deployment. It is read at the start of a
/// step and written at most once at the end; a step that aborts leaves the
/// previously persisted record untouched.
///
/// # Examples
///
/// ```
/// use fabula_storage::StoryState;
///
/// let state = StoryState::default();
/// assert!(state.text.is_empty());
/// assert!(state.last_poll_message_id.is_none());
/// assert!(!state.finished);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoryState {
    /// Accumulated story text so far
    pub text: String,
    /// Message id of the most recently opened poll, if any
    pub last_poll_message_id: Option<i64>,
    /// Once true, the orchestrator stops advancing the story
    pub finished: bool,
}

impl StoryState {
    /// True when no story has been posted yet.
    pub fn is_fresh(&self) -> bool {
        self.text.is_empty()
    }
}
