//! Wire types for the `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for a chat completion.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<WireToolChoice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: WireFunction,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireFunction {
    pub name: String,
    pub description: String,
    pub strict: bool,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireToolChoice {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: WireToolChoiceFunction,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireToolChoiceFunction {
    pub name: String,
}

/// Response body for a chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    pub function: WireToolCallFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireToolCallFunction {
    pub name: String,
    /// JSON-encoded argument object, as the wire format ships it
    pub arguments: String,
}
