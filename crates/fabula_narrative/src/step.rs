//! Result of one generation pass.

/// One generated story step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryStep {
    /// The next block of narrative text
    pub continuation: String,
    /// Audience poll options; exactly 4 entries, or empty when the story ends
    pub poll_options: Vec<String>,
    /// Whether this step concludes the story
    pub is_ending: bool,
}
