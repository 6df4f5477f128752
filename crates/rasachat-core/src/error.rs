//! Errors produced by a send cycle.

use thiserror::Error;

/// Failure of a single webhook exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    /// The response body was not a JSON array of reply objects.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ChatError {
    /// Whether resending the same message may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChatError::Network(_) | ChatError::Status { .. })
    }

    /// Text shown in the transcript for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(detail) => {
                format!("Could not reach the chat server ({}).", detail)
            }
            ChatError::Status { status } => {
                format!("The chat server rejected the message (HTTP {}).", status)
            }
            ChatError::Protocol(detail) => {
                format!("The chat server sent a reply that could not be read ({}).", detail)
            }
        }
    }
}
