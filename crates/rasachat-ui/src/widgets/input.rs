//! Input field widget.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use rasachat_core::InputBuffer;

use crate::theme::Theme;

/// Single-line text field bound to an [`InputBuffer`].
#[derive(Debug, Clone)]
pub struct InputWidget<'a> {
    input: &'a InputBuffer,
    focused: bool,
    placeholder: Option<&'a str>,
    theme: Theme,
}

impl<'a> InputWidget<'a> {
    pub fn new(input: &'a InputBuffer) -> Self {
        Self {
            input,
            focused: false,
            placeholder: None,
            theme: Theme::default(),
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Text shown in the field, with a `|` cursor marker when focused.
    pub fn display_text(&self) -> String {
        if self.input.is_empty() && !self.focused {
            return self.placeholder.unwrap_or_default().to_string();
        }

        if self.focused {
            let value = self.input.value();
            let cursor = self.input.cursor().min(value.chars().count());
            let before: String = value.chars().take(cursor).collect();
            let after: String = value.chars().skip(cursor).collect();
            format!("{}|{}", before, after)
        } else {
            self.input.value().to_string()
        }
    }

    /// Render the widget.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };

        let text_style = if self.input.is_empty() && !self.focused {
            self.theme.muted_style()
        } else {
            Default::default()
        };

        // Keep the cursor end visible on long input
        let display = self.display_text();
        let visible = tail_fitting(&display, area.width.saturating_sub(2) as usize);

        let paragraph = Paragraph::new(Line::from(Span::styled(visible, text_style))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Message "),
        );

        frame.render_widget(paragraph, area);
    }
}

/// Longest suffix of `text` that fits in `width` display columns.
fn tail_fitting(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        start = idx;
    }
    text[start..].to_string()
}
