//! Webhook client for rasachat.
//!
//! Provides the HTTP [`Transport`](rasachat_core::Transport) used by the
//! terminal client to talk to a Rasa server's REST channel.

pub mod config;
pub mod error;
pub mod webhook;

pub use config::ClientConfig;
pub use error::ClientError;
pub use webhook::WebhookClient;
