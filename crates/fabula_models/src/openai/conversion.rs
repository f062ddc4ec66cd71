//! Conversions between core types and the chat-completion wire format.

use super::dto::{
    ChatCompletionRequest, ChatCompletionResponse, WireFunction, WireMessage, WireTool,
    WireToolChoice, WireToolChoiceFunction,
};
use fabula_core::{GenerateRequest, GenerateResponse, Output, ToolCall};
use fabula_error::{GenerationError, GenerationErrorKind};

pub fn to_chat_completion_request(
    req: &GenerateRequest,
    default_model: &str,
) -> ChatCompletionRequest {
    let tools = req
        .tools
        .iter()
        .map(|tool| WireTool {
            kind: "function",
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                strict: true,
                parameters: tool.parameters.clone(),
            },
        })
        .collect();

    let tool_choice = req.tool_choice.as_ref().map(|name| WireToolChoice {
        kind: "function",
        function: WireToolChoiceFunction { name: name.clone() },
    });

    ChatCompletionRequest {
        model: req
            .model
            .clone()
            .unwrap_or_else(|| default_model.to_string()),
        messages: req
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_wire(),
                content: m.content.clone(),
            })
            .collect(),
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        tools,
        tool_choice,
    }
}

pub fn from_chat_completion_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, GenerationError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::MalformedArguments(
            "response contained no choices".to_string(),
        ))
    })?;

    let mut outputs = Vec::new();

    if let Some(content) = choice.message.content {
        if !content.is_empty() {
            outputs.push(Output::Text(content));
        }
    }

    if let Some(calls) = choice.message.tool_calls {
        let mut tool_calls = Vec::with_capacity(calls.len());
        for call in calls {
            // The wire format double-encodes arguments as a JSON string
            let arguments = serde_json::from_str(&call.function.arguments).map_err(|e| {
                GenerationError::new(GenerationErrorKind::MalformedArguments(format!(
                    "tool '{}': {}",
                    call.function.name, e
                )))
            })?;
            tool_calls.push(ToolCall {
                id: call.id,
                name: call.function.name,
                arguments,
            });
        }
        outputs.push(Output::ToolCalls(tool_calls));
    }

    Ok(GenerateResponse { outputs })
}
