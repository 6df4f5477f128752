//! Chat widget for displaying the transcript.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use rasachat_core::{Origin, Transcript};

use crate::theme::Theme;
use crate::utils::wrap_text_indented;

/// Scrollable view over a [`Transcript`].
///
/// Rendering records the maximum scroll extent back into the transcript so
/// that a transcript pinned to the bottom always shows its newest line.
#[derive(Debug)]
pub struct ChatWidget<'a> {
    transcript: &'a mut Transcript,
    /// Replies still outstanding.
    pending: usize,
    theme: Theme,
}

impl<'a> ChatWidget<'a> {
    pub fn new(transcript: &'a mut Transcript) -> Self {
        Self {
            transcript,
            pending: 0,
            theme: Theme::default(),
        }
    }

    /// Show a waiting indicator for `count` outstanding replies.
    pub fn pending(mut self, count: usize) -> Self {
        self.pending = count;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Build every transcript line for a given text width.
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut all_lines: Vec<Line<'static>> = Vec::new();

        for msg in self.transcript.messages() {
            let prefix = match msg.origin() {
                Origin::User => "You: ",
                Origin::Bot => "Bot: ",
                Origin::Error => "Error: ",
            };

            all_lines.push(Line::from(vec![
                Span::styled(prefix, self.theme.origin_style(msg.origin())),
                Span::styled(
                    msg.timestamp().format("%H:%M:%S").to_string(),
                    self.theme.muted_style(),
                ),
            ]));

            let body_style = self.theme.body_style(msg.origin());
            for wrapped in wrap_text_indented(msg.text(), width, "  ") {
                all_lines.push(Line::from(Span::styled(wrapped, body_style)));
            }

            all_lines.push(Line::from(""));
        }

        if self.pending > 0 {
            let label = if self.pending == 1 {
                "(waiting for reply...)".to_string()
            } else {
                format!("(waiting for {} replies...)", self.pending)
            };
            all_lines.push(Line::from(vec![
                Span::styled("Bot: ", self.theme.origin_style(Origin::Bot)),
                Span::styled(label, self.theme.muted_style()),
            ]));
        }

        all_lines
    }

    /// Render the widget.
    pub fn render(mut self, frame: &mut Frame, area: Rect) {
        let border_style = self.theme.unfocused_border();

        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;

        let all_lines = self.lines(text_width);
        let total_lines = all_lines.len();

        self.transcript
            .set_max_offset(total_lines.saturating_sub(visible_height));
        let scroll_offset = self.transcript.offset();

        let lines: Vec<Line> = all_lines
            .into_iter()
            .skip(scroll_offset)
            .take(visible_height)
            .collect();

        let first_line = if total_lines == 0 { 0 } else { scroll_offset + 1 };
        let last_line = (scroll_offset + visible_height).min(total_lines);
        let title = format!(" Chat [{}-{}/{}] ", first_line, last_line, total_lines);

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

        frame.render_widget(paragraph, area);
    }
}
