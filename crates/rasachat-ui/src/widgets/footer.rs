//! Footer widget showing status and key help.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme::Theme;

/// Single-line footer: a status segment followed by help text.
#[derive(Debug, Clone)]
pub struct Footer<'a> {
    status: &'a str,
    status_style: Style,
    help: &'a str,
    theme: Theme,
}

impl<'a> Footer<'a> {
    pub fn new(help: &'a str) -> Self {
        let theme = Theme::default();
        Self {
            status: "",
            status_style: theme.success_style(),
            help,
            theme,
        }
    }

    /// Set the status segment and its style.
    pub fn status(mut self, status: &'a str, style: Style) -> Self {
        self.status = status;
        self.status_style = style;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the footer.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if !self.status.is_empty() {
            spans.push(Span::styled(format!(" {} ", self.status), self.status_style));
            spans.push(Span::raw("|"));
        }
        spans.push(Span::styled(format!(" {}", self.help), self.theme.muted_style()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
