//! OpenAI-compatible chat-completion client.

use super::{conversion, dto::ChatCompletionResponse};
use async_trait::async_trait;
use fabula_core::{ChatDriver, GenerateRequest, GenerateResponse};
use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind};
use reqwest::Client;
use tracing::{debug, instrument};

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// The base URL comes from configuration, so the same client serves the
/// hosted OpenAI API or a compatible proxy.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatClient {
    /// Creates a new chat client.
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatDriver for OpenAiChatClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        let body = conversion::to_chat_completion_request(req, &self.model);

        let url = self.completions_url();
        debug!(url = %url, messages = req.messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ApiRequest(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::new(GenerationErrorKind::HttpStatus {
                status_code,
                message,
            })
            .into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::ApiRequest(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        conversion::from_chat_completion_response(completion).map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
