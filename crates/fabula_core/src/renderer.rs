//! Trait seam between the orchestrator and image providers.

use async_trait::async_trait;
use fabula_error::FabulaResult;

/// Trait that image-synthesis backends implement.
///
/// The capability is optional at the system level: when no image provider is
/// configured the orchestrator holds no renderer at all and publishes
/// text-only.
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    /// Request image synthesis and return the raw image bytes.
    async fn render(&self, prompt: &str) -> FabulaResult<Vec<u8>>;
}
