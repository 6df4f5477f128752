//! UI state for rendering.

use rasachat_core::{ChatSession, InputBuffer};

use crate::event::ConnectionState;

/// Everything the UI thread owns.
pub struct UiState {
    /// Transcript and send bookkeeping.
    pub session: ChatSession,

    /// The message field.
    pub input: InputBuffer,

    /// Webhook URL, shown in the header.
    pub webhook_url: String,

    /// Reachability of the server.
    pub connection_state: ConnectionState,

    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl UiState {
    pub fn new(session: ChatSession, webhook_url: impl Into<String>) -> Self {
        Self {
            session,
            input: InputBuffer::new(),
            webhook_url: webhook_url.into(),
            connection_state: ConnectionState::default(),
            should_quit: false,
        }
    }

    /// Status text for the footer.
    pub fn status_message(&self) -> String {
        let in_flight = self.session.in_flight();
        if self.session.retryable().is_some() {
            "Send failed - Ctrl+R to retry".to_string()
        } else if in_flight > 0 {
            format!("Waiting for {} repl{}", in_flight, if in_flight == 1 { "y" } else { "ies" })
        } else {
            match self.connection_state {
                ConnectionState::Checking => "Connecting...".to_string(),
                ConnectionState::Reachable => "Connected".to_string(),
                ConnectionState::Unreachable => "Server unreachable - F5 to check again".to_string(),
            }
        }
    }
}
