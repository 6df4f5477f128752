//! Chat message types for the transcript.

use chrono::{DateTime, Utc};

/// Who a message came from. Drives its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Typed by the local user.
    User,
    /// Returned by the conversational-AI server.
    Bot,
    /// Status message for a failed exchange.
    Error,
}

impl Origin {
    /// Presentation class for this origin.
    pub fn class_name(&self) -> &'static str {
        match self {
            Origin::User => "user-message",
            Origin::Bot => "bot-message",
            Origin::Error => "error-message",
        }
    }

    /// Short label used when printing a transcript line.
    pub fn label(&self) -> &'static str {
        match self {
            Origin::User => "you",
            Origin::Bot => "bot",
            Origin::Error => "error",
        }
    }
}

/// A rendered message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    origin: Origin,
    text: String,
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new chat message.
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    /// Create a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Origin::Bot, text)
    }

    /// Create an error status message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Origin::Error, text)
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
