//! Rasa REST webhook wire format.
//!
//! Request: `{"sender": "<id>", "message": "<text>"}`.
//! Response: a JSON array of reply objects. Only `text` is rendered; other
//! fields (`recipient_id`, `image`, `buttons`, `custom`) are ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChatError;

/// Webhook of a Rasa server running locally with the REST channel enabled.
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5005/webhooks/rest/webhook";

/// Path of the REST channel webhook.
pub const WEBHOOK_PATH: &str = "/webhooks/rest/webhook";

/// Sender id used when none is configured.
pub const DEFAULT_SENDER: &str = "user";

/// Body of a webhook POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub sender: String,
    pub message: String,
}

impl WebhookRequest {
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
        }
    }
}

/// One element of the webhook response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl BotReply {
    /// A text reply addressed to `recipient_id`.
    pub fn text(recipient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient_id: Some(recipient_id.into()),
            text: Some(text.into()),
        }
    }
}

/// Parse a webhook response body.
///
/// Anything but a JSON array of objects is a protocol error. Entries with no
/// `text` are dropped.
pub fn parse_replies(body: &[u8]) -> Result<Vec<BotReply>, ChatError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ChatError::Protocol(format!("invalid JSON: {}", e)))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(ChatError::Protocol(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut replies = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(ChatError::Protocol(format!(
                "reply {} is {}, expected an object",
                index,
                json_kind(&item)
            )));
        }
        let reply: BotReply = serde_json::from_value(item)
            .map_err(|e| ChatError::Protocol(format!("reply {}: {}", index, e)))?;
        if reply.text.is_none() {
            debug!(index, "Skipping reply without text");
            continue;
        }
        replies.push(reply);
    }

    Ok(replies)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
