//! Output types from chat-completion responses.

use serde::{Deserialize, Serialize};

/// Supported output types from the text provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),
    /// Tool/function calls requested by the model.
    ToolCalls(Vec<ToolCall>),
}

/// A tool/function call made by the model.
///
/// The narrative layer forces a named tool call on every request and reads
/// the structured result from the call arguments.
///
/// # Examples
///
/// ```
/// use fabula_core::ToolCall;
/// use serde_json::json;
///
/// let call = ToolCall {
///     id: "call_0".to_string(),
///     name: "write_story_part".to_string(),
///     arguments: json!({"story_part": "The rain stopped."}),
/// };
///
/// assert_eq!(call.name, "write_story_part");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned identifier for this call
    pub id: String,
    /// Name of the tool the model invoked
    pub name: String,
    /// Arguments passed to the tool (as JSON)
    pub arguments: serde_json::Value,
}
