//! Shared fakes for integration tests.
//!
//! `RecordingClient` stands in for Telegram and keeps every message it was
//! asked to send so tests can assert on the exact conversation.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use newsrelay::RelayError;
use newsrelay::core::models::Destination;
use newsrelay::telegram::{MessageClient, TextMode};
use serde_json::{Value, json};

/// One recorded `send_text` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: Destination,
    pub text: String,
    pub mode: TextMode,
    pub disable_link_preview: bool,
}

#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<SentMessage>>,
    fail_sends: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every send fails like an unreachable Telegram API.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }
}

#[async_trait]
impl MessageClient for RecordingClient {
    async fn send_text(
        &self,
        destination: &Destination,
        text: &str,
        mode: TextMode,
        disable_link_preview: bool,
    ) -> Result<(), RelayError> {
        if self.fail_sends {
            return Err(RelayError::TelegramError("network down".to_string()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            destination: destination.clone(),
            text: text.to_string(),
            mode,
            disable_link_preview,
        });
        Ok(())
    }
}

/// API Gateway v2 style event.
pub fn http_event(method: &str, body: Option<&str>) -> Value {
    let mut event = json!({
        "requestContext": { "http": { "method": method } },
        "headers": { "content-type": "application/json" },
        "isBase64Encoded": false
    });
    if let Some(body) = body {
        event["body"] = Value::String(body.to_string());
    }
    event
}

/// Telegram update carrying a text message from chat `chat_id`.
pub fn text_update(chat_id: i64, text: &str) -> String {
    json!({
        "update_id": 10_000,
        "message": {
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": { "id": chat_id, "type": "private" },
            "from": { "id": chat_id, "is_bot": false, "first_name": "Test" },
            "text": text
        }
    })
    .to_string()
}

pub fn status_of(response: &Value) -> u16 {
    newsrelay::api::helpers::status_of(response).expect("response has a status code")
}

pub fn body_of(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().expect("string body")).expect("JSON body")
}
