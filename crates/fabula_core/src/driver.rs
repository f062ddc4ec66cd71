//! Trait seam between the narrative layer and text providers.

use crate::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use fabula_error::FabulaResult;

/// Core trait that text-generation backends implement.
///
/// The narrative layer only depends on this seam, so tests can substitute a
/// scripted mock for the real provider client.
#[async_trait]
pub trait ChatDriver: Send + Sync {
    /// Generate model output for a chat request.
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier the client targets by default.
    fn model_name(&self) -> &str;
}
