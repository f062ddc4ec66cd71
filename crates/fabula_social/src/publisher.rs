//! Publishing seam between the orchestrator and the messaging platform.

use async_trait::async_trait;
use fabula_error::FabulaResult;

/// Result of closing an audience poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Text of the winning option
    pub winner: String,
    /// Vote count the winner received
    pub votes: u32,
}

/// Operations the orchestrator needs from the messaging platform.
///
/// Side effects are externally visible and irreversible once the platform
/// acknowledges them; implementations must not perform them in dry-run mode.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Stop the poll with the given message id and return the winning
    /// option, if any.
    ///
    /// A `None` poll id is a no-op returning `None`. Zero votes also yield
    /// `None`; the caller degrades to its default steering mode.
    async fn close_poll(&self, poll_id: Option<i64>) -> FabulaResult<Option<PollOutcome>>;

    /// Post the scene text (and illustration, when present) as one unit.
    ///
    /// Returns the message id of the posted scene text.
    async fn publish(&self, text: &str, image: Option<&[u8]>) -> FabulaResult<i64>;

    /// Open a new audience poll following the published message.
    ///
    /// Returns the message id of the poll.
    async fn open_poll(
        &self,
        question: &str,
        options: &[String],
        reply_to: Option<i64>,
    ) -> FabulaResult<i64>;
}

#[async_trait]
impl<P: Publisher + ?Sized> Publisher for Box<P> {
    async fn close_poll(&self, poll_id: Option<i64>) -> FabulaResult<Option<PollOutcome>> {
        (**self).close_poll(poll_id).await
    }

    async fn publish(&self, text: &str, image: Option<&[u8]>) -> FabulaResult<i64> {
        (**self).publish(text, image).await
    }

    async fn open_poll(
        &self,
        question: &str,
        options: &[String],
        reply_to: Option<i64>,
    ) -> FabulaResult<i64> {
        (**self).open_poll(question, options, reply_to).await
    }
}

#[async_trait]
impl<P: Publisher + ?Sized> Publisher for std::sync::Arc<P> {
    async fn close_poll(&self, poll_id: Option<i64>) -> FabulaResult<Option<PollOutcome>> {
        (**self).close_poll(poll_id).await
    }

    async fn publish(&self, text: &str, image: Option<&[u8]>) -> FabulaResult<i64> {
        (**self).publish(text, image).await
    }

    async fn open_poll(
        &self,
        question: &str,
        options: &[String],
        reply_to: Option<i64>,
    ) -> FabulaResult<i64> {
        (**self).open_poll(question, options, reply_to).await
    }
}
