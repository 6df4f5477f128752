//! Transport seam between the session and the network.

use async_trait::async_trait;

use crate::error::ChatError;
use crate::wire::{BotReply, WebhookRequest};

/// Delivers one message to the conversational-AI server.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the text replies in response order.
    async fn send(&self, request: &WebhookRequest) -> Result<Vec<BotReply>, ChatError>;
}
