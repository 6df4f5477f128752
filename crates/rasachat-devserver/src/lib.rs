//! Development server speaking the Rasa REST channel protocol.
//!
//! Answers webhook messages from a keyword knowledge base so the chat client
//! can be exercised without a real Rasa deployment.

pub mod http;
pub mod knowledge;
pub mod state;

pub use http::create_router;
pub use knowledge::{Answer, Entry, KnowledgeBase, KnowledgeError};
pub use state::AppState;
