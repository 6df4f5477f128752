//! rasachat Core Domain Types
//!
//! This crate contains the chat model with no dependencies on:
//! - HTTP clients
//! - Terminal rendering
//! - Runtime specifics
//!
//! The send/render cycle lives in [`session`]; the network side is reached
//! only through the [`Transport`] trait.

pub mod error;
pub mod input;
pub mod message;
pub mod session;
pub mod transcript;
pub mod transport;
pub mod wire;

// Re-export commonly used types
pub use error::ChatError;
pub use input::InputBuffer;
pub use message::{ChatMessage, Origin};
pub use session::{ChatSession, DeliveryOrder, PendingSend};
pub use transcript::{Scroll, Transcript};
pub use transport::Transport;
pub use wire::{BotReply, WebhookRequest, DEFAULT_SENDER, DEFAULT_WEBHOOK_URL, WEBHOOK_PATH};
