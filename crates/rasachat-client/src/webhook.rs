//! HTTP transport for the REST channel webhook.

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use rasachat_core::wire::parse_replies;
use rasachat_core::{BotReply, ChatError, Transport, WebhookRequest};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for a single webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    inner: reqwest::Client,
    webhook_url: Url,
}

impl WebhookClient {
    /// Create a new client for `config.webhook_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let webhook_url =
            Url::parse(&config.webhook_url).map_err(|e| ClientError::InvalidUrl {
                url: config.webhook_url.clone(),
                reason: e.to_string(),
            })?;

        if !matches!(webhook_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: config.webhook_url.clone(),
                reason: format!("unsupported scheme '{}'", webhook_url.scheme()),
            });
        }

        let inner = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { inner, webhook_url })
    }

    pub fn webhook_url(&self) -> &Url {
        &self.webhook_url
    }

    /// Check whether the server behind the webhook answers at its root.
    pub async fn ping(&self) -> bool {
        let mut root = self.webhook_url.clone();
        root.set_path("/");
        root.set_query(None);
        debug!(url = %root, "Pinging server");

        match self.inner.get(root).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Ping failed");
                false
            }
        }
    }
}

#[async_trait]
impl Transport for WebhookClient {
    async fn send(&self, request: &WebhookRequest) -> Result<Vec<BotReply>, ChatError> {
        debug!(url = %self.webhook_url, sender = %request.sender, "POST webhook");

        let response = self
            .inner
            .post(self.webhook_url.clone())
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network_error)?;
        let replies = parse_replies(&body)?;
        debug!(count = replies.len(), "Received replies");
        Ok(replies)
    }
}

fn network_error(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Network("request timed out".to_string())
    } else if e.is_connect() {
        ChatError::Network("connection refused or unreachable".to_string())
    } else {
        ChatError::Network(e.to_string())
    }
}
