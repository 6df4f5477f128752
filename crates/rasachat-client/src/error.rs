//! Error types for building the webhook client.

use thiserror::Error;

/// Errors that can occur when setting up the webhook client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The webhook URL could not be parsed.
    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The underlying HTTP client failed to initialize.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
