//! Gemini image synthesis over the REST `:predict` surface.

use super::dto::{Instance, Parameters, PredictRequest, PredictResponse};
use async_trait::async_trait;
use base64::Engine;
use fabula_core::ImageRenderer;
use fabula_error::{FabulaResult, GenerationError, GenerationErrorKind};
use reqwest::Client;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for Gemini image generation.
///
/// One prompt in, one image out. The capability is optional at the system
/// level: when no credential is configured the orchestrator never constructs
/// this client and publishing proceeds text-only.
#[derive(Debug, Clone)]
pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiImageClient {
    /// Creates a new image client for the given model.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Creates a client against a non-default endpoint (tests, proxies).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Model identifier the client targets.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Request image synthesis and return the raw image bytes.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn render(&self, prompt: &str) -> FabulaResult<Vec<u8>> {
        let body = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: Parameters { sample_count: 1 },
        };

        let url = format!(
            "{}/models/{}:predict",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        debug!(url = %url, "Sending image synthesis request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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

        let predict: PredictResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::ApiRequest(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let encoded = predict
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded)
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingImage))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| GenerationError::new(GenerationErrorKind::Base64Decode(e.to_string())))?;

        debug!(size = bytes.len(), "Decoded generated image");
        Ok(bytes)
    }
}

#[async_trait]
impl ImageRenderer for GeminiImageClient {
    async fn render(&self, prompt: &str) -> FabulaResult<Vec<u8>> {
        GeminiImageClient::render(self, prompt).await
    }
}
