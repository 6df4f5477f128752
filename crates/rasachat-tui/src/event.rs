//! Event types for communication between the backend and the UI thread.

use rasachat_core::{BotReply, ChatError, PendingSend};

/// Reachability of the chat server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No probe has finished yet.
    #[default]
    Checking,

    /// The server answered the last probe or message.
    Reachable,

    /// The last probe or message could not reach the server.
    Unreachable,
}

/// Events sent from the backend to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A send finished, successfully or not.
    ReplyReceived {
        seq: u64,
        result: Result<Vec<BotReply>, ChatError>,
    },

    /// Reachability changed.
    ConnectionStateChanged(ConnectionState),
}

/// Commands sent from the UI thread to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Deliver a message. Runs concurrently with other sends.
    Send(PendingSend),

    /// Probe the server root.
    Ping,

    /// Stop the backend.
    Quit,
}
