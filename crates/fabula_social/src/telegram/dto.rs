//! Wire types for the Telegram Bot API.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method returns.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    pub message_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePoll {
    #[serde(default)]
    pub options: Vec<WirePollOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePollOption {
    pub text: String,
    #[serde(default)]
    pub voter_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyParameters {
    pub message_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageBody {
    pub chat_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendPollBody {
    pub chat_id: String,
    pub question: String,
    pub options: Vec<String>,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopPollBody {
    pub chat_id: String,
    pub message_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_poll_response_deserializes() {
        let body = r#"{
            "ok": true,
            "result": {
                "id": "58372",
                "is_closed": true,
                "options": [
                    {"text": "Turn left", "voter_count": 3},
                    {"text": "Turn right", "voter_count": 1}
                ]
            }
        }"#;

        let response: ApiResponse<WirePoll> = serde_json::from_str(body).unwrap();
        assert!(response.ok);
        let poll = response.result.unwrap();
        assert_eq!(poll.options.len(), 2);
        assert_eq!(poll.options[0].voter_count, 3);
    }

    #[test]
    fn error_response_carries_description() {
        let body = r#"{"ok": false, "error_code": 400, "description": "Bad Request: poll has already been closed"}"#;
        let response: ApiResponse<WirePoll> = serde_json::from_str(body).unwrap();
        assert!(!response.ok);
        assert!(response.description.unwrap().contains("already been closed"));
    }
}
