//! No-network publisher for dry-run mode.

use crate::{PollOutcome, Publisher};
use async_trait::async_trait;
use fabula_error::FabulaResult;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{info, instrument};

/// Publisher that never contacts the messaging platform.
///
/// Every operation is a no-op that logs what would have been sent and
/// returns a synthesized placeholder identifier, so the rest of a dry-run
/// step behaves exactly like a live one.
#[derive(Debug, Default)]
pub struct DryRunPublisher {
    next_id: AtomicI64,
}

impl DryRunPublisher {
    /// Creates a dry-run publisher.
    pub fn new() -> Self {
        Self::default()
    }

    fn synthesize_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl Publisher for DryRunPublisher {
    #[instrument(skip(self))]
    async fn close_poll(&self, poll_id: Option<i64>) -> FabulaResult<Option<PollOutcome>> {
        info!(poll_id = ?poll_id, "Dry run: not closing poll");
        Ok(None)
    }

    #[instrument(skip(self, text, image), fields(text_len = text.len(), has_image = image.is_some()))]
    async fn publish(&self, text: &str, image: Option<&[u8]>) -> FabulaResult<i64> {
        let id = self.synthesize_id();
        let preview: String = text.chars().take(80).collect();
        info!(message_id = id, preview = %preview, "Dry run: not publishing");
        Ok(id)
    }

    #[instrument(skip(self, question, options))]
    async fn open_poll(
        &self,
        question: &str,
        options: &[String],
        _reply_to: Option<i64>,
    ) -> FabulaResult<i64> {
        let id = self.synthesize_id();
        info!(poll_message_id = id, options = ?options, "Dry run: not opening poll");
        Ok(id)
    }
}
