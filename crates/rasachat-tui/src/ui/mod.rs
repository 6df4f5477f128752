//! Rendering for the chat TUI.

mod render;

pub use render::render;
