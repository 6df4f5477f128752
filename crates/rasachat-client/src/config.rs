//! Client configuration.

use std::time::Duration;

use rasachat_core::DEFAULT_WEBHOOK_URL;

/// Webhook client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the REST channel webhook.
    pub webhook_url: String,

    /// Time allowed for one request, including reading the body.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}
