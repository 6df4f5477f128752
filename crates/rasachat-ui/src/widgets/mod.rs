//! Reusable widgets.

pub mod chat;
pub mod footer;
pub mod input;
