//! Telegram publisher over the Bot API.

use super::dto::{
    ApiResponse, ReplyParameters, SendMessageBody, SendPollBody, StopPollBody, WireMessage,
    WirePoll,
};
use super::winner::decide_winner;
use crate::{PollOutcome, Publisher};
use async_trait::async_trait;
use fabula_error::{FabulaResult, PublishError, PublishErrorKind};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Hard limit the platform puts on one message.
const MESSAGE_MAX_CHARS: usize = 4096;

/// Hard limit the platform puts on one poll option.
const POLL_OPTION_MAX_CHARS: usize = 100;

/// Publishes story steps to a Telegram channel.
#[derive(Debug, Clone)]
pub struct TelegramPublisher {
    client: Client,
    token: String,
    chat_id: String,
    base_url: String,
}

impl TelegramPublisher {
    /// Creates a publisher for the given bot credential and channel.
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_base_url(token, chat_id, DEFAULT_BASE_URL.to_string())
    }

    /// Creates a publisher against a non-default endpoint (tests, proxies).
    pub fn with_base_url(token: String, chat_id: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            chat_id,
            base_url,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, PublishError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                PublishError::new(PublishErrorKind::Http(format!("{}: {}", method, e)))
            })?;

        // The platform reports errors as a JSON envelope with ok=false,
        // usually alongside a 4xx status
        let status_code = response.status().as_u16();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::MalformedResponse(format!(
                "{}: {}",
                method, e
            )))
        })?;

        if !envelope.ok {
            return Err(PublishError::new(PublishErrorKind::Api {
                status_code,
                description: envelope.description.unwrap_or_default(),
            }));
        }

        envelope.result.ok_or_else(|| {
            PublishError::new(PublishErrorKind::MalformedResponse(format!(
                "{}: envelope had ok=true but no result",
                method
            )))
        })
    }

    async fn send_photo(&self, image: &[u8]) -> Result<i64, PublishError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec()).file_name("illustration.png");
        let form = reqwest::multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("has_spoiler", "true")
            .part("photo", part);

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                PublishError::new(PublishErrorKind::Http(format!("sendPhoto: {}", e)))
            })?;

        let status_code = response.status().as_u16();
        let envelope: ApiResponse<WireMessage> = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::MalformedResponse(format!(
                "sendPhoto: {}",
                e
            )))
        })?;

        if !envelope.ok {
            return Err(PublishError::new(PublishErrorKind::Api {
                status_code,
                description: envelope.description.unwrap_or_default(),
            }));
        }

        let message = envelope.result.ok_or_else(|| {
            PublishError::new(PublishErrorKind::MalformedResponse(
                "sendPhoto: envelope had ok=true but no result".to_string(),
            ))
        })?;

        debug!(photo_message_id = message.message_id, "Sent illustration");
        Ok(message.message_id)
    }
}

#[async_trait]
impl Publisher for TelegramPublisher {
    #[instrument(skip(self), fields(chat_id = %self.chat_id))]
    async fn close_poll(&self, poll_id: Option<i64>) -> FabulaResult<Option<PollOutcome>> {
        let Some(message_id) = poll_id else {
            debug!("No prior poll to close");
            return Ok(None);
        };

        let body = StopPollBody {
            chat_id: self.chat_id.clone(),
            message_id,
        };

        let poll: WirePoll = match self.call("stopPoll", &body).await {
            Ok(poll) => poll,
            Err(e) => {
                // A poll that is already closed, or whose message is gone, is
                // not a reason to skip this step
                if let PublishErrorKind::Api { description, .. } = &e.kind {
                    let text = description.to_lowercase();
                    if text.contains("poll has already been closed")
                        || text.contains("message to stop poll not found")
                    {
                        warn!(message_id, description = %description, "Prior poll could not be stopped");
                        return Ok(None);
                    }
                }
                return Err(e.into());
            }
        };

        let outcome = decide_winner(&poll.options);
        match &outcome {
            Some(result) => {
                info!(winner = %result.winner, votes = result.votes, "Poll winner determined")
            }
            None => info!(message_id, "Poll closed without votes"),
        }
        Ok(outcome)
    }

    #[instrument(skip(self, text, image), fields(chat_id = %self.chat_id, text_len = text.len(), has_image = image.is_some()))]
    async fn publish(&self, text: &str, image: Option<&[u8]>) -> FabulaResult<i64> {
        let photo_id = match image {
            Some(bytes) => Some(self.send_photo(bytes).await?),
            None => None,
        };

        let chunks = split_message(text, MESSAGE_MAX_CHARS);
        if chunks.len() > 1 {
            info!(chunks = chunks.len(), "Scene text exceeds the message limit, splitting");
        }

        let mut last_id = 0;
        for (index, chunk) in chunks.iter().enumerate() {
            let reply_parameters = if index == 0 {
                photo_id.map(|message_id| ReplyParameters { message_id })
            } else {
                None
            };
            let body = SendMessageBody {
                chat_id: self.chat_id.clone(),
                text: chunk.clone(),
                reply_parameters,
            };
            let message: WireMessage = self.call("sendMessage", &body).await?;
            last_id = message.message_id;
        }

        info!(message_id = last_id, "Published story step");
        Ok(last_id)
    }

    #[instrument(skip(self, question, options), fields(chat_id = %self.chat_id, options = options.len()))]
    async fn open_poll(
        &self,
        question: &str,
        options: &[String],
        reply_to: Option<i64>,
    ) -> FabulaResult<i64> {
        let body = SendPollBody {
            chat_id: self.chat_id.clone(),
            question: question.to_string(),
            options: options
                .iter()
                .map(|opt| clip_chars(opt, POLL_OPTION_MAX_CHARS))
                .collect(),
            is_anonymous: true,
            reply_parameters: reply_to.map(|message_id| ReplyParameters { message_id }),
        };

        let message: WireMessage = self.call("sendPoll", &body).await?;
        info!(poll_message_id = message.message_id, "Opened audience poll");
        Ok(message.message_id)
    }
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    chunks.push(current);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_message("hello", 4096);
        assert_eq!(chunks, vec!["hello".to_string()]);
    }

    #[test]
    fn long_text_splits_at_the_char_limit() {
        let text = "a".repeat(5000);
        let chunks = split_message(&text, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 4096);
        assert_eq!(chunks[1].chars().count(), 904);
    }

    #[test]
    fn splitting_respects_char_boundaries() {
        let text = "я".repeat(10);
        let chunks = split_message(&text, 3);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.chars().all(|ch| ch == 'я')));
    }

    #[test]
    fn options_are_clipped_to_the_platform_limit() {
        let long = "x".repeat(150);
        assert_eq!(clip_chars(&long, 100).chars().count(), 100);
        assert_eq!(clip_chars("short", 100), "short");
    }
}
