//! Shared server state.

use std::sync::Arc;

use crate::knowledge::KnowledgeBase;

/// State shared by all request handlers.
pub struct AppState {
    pub knowledge: KnowledgeBase,
}

impl AppState {
    pub fn new(knowledge: KnowledgeBase) -> Arc<Self> {
        Arc::new(Self { knowledge })
    }
}
