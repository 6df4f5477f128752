//! Terminal widgets for rasachat.
//!
//! The crate is organized into:
//! - `widgets` - ratatui widgets (chat transcript, input field, footer)
//! - `theme` - Colors and styles, one per message origin
//! - `utils` - Text wrapping utilities

pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;
pub use utils::{truncate, wrap_text_indented};
pub use widgets::chat::ChatWidget;
pub use widgets::footer::Footer;
pub use widgets::input::InputWidget;
