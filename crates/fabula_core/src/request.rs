//! Request and response types for text generation.

use crate::{ChatMessage, Output, ToolCall, ToolSpec};
use serde::{Deserialize, Serialize};

/// A chat-completion request.
///
/// # Examples
///
/// ```
/// use fabula_core::{ChatMessage, GenerateRequest};
///
/// let request = GenerateRequest {
///     messages: vec![ChatMessage::user("Hello!")],
///     max_tokens: Some(100),
///     temperature: Some(0.7),
///     model: None,
///     tools: vec![],
///     tool_choice: None,
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier, when overriding the client default
    pub model: Option<String>,
    /// Tools the model may call
    pub tools: Vec<ToolSpec>,
    /// Name of the tool the model is required to call
    pub tool_choice: Option<String>,
}

impl GenerateRequest {
    /// Build a request that forces a single named tool call.
    pub fn forced_tool(messages: Vec<ChatMessage>, tool: ToolSpec) -> Self {
        let tool_choice = Some(tool.name.clone());
        Self {
            messages,
            tools: vec![tool],
            tool_choice,
            ..Default::default()
        }
    }
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Find the first tool call with the given name, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::{GenerateResponse, Output, ToolCall};
    /// use serde_json::json;
    ///
    /// let response = GenerateResponse {
    ///     outputs: vec![Output::ToolCalls(vec![ToolCall {
    ///         id: "call_0".to_string(),
    ///         name: "suggest_poll_options".to_string(),
    ///         arguments: json!({"options": []}),
    ///     }])],
    /// };
    ///
    /// assert!(response.tool_call("suggest_poll_options").is_some());
    /// assert!(response.tool_call("write_story_part").is_none());
    /// ```
    pub fn tool_call(&self, name: &str) -> Option<&ToolCall> {
        self.outputs.iter().find_map(|output| match output {
            Output::ToolCalls(calls) => calls.iter().find(|call| call.name == name),
            _ => None,
        })
    }
}
