//! Main render function for the TUI.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use rasachat_ui::{truncate, ChatWidget, Footer, InputWidget, Theme};

use crate::event::ConnectionState;
use crate::state::UiState;

const HELP: &str = "Enter: send | Ctrl+R: retry | Up/Down/PgUp/PgDn: scroll | Ctrl+L: latest | Esc: quit";

/// Render the entire UI.
pub fn render(frame: &mut Frame, state: &mut UiState) {
    let theme = Theme::default();

    // Header, transcript, input field, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, state, &theme);

    let pending = state.session.in_flight();
    ChatWidget::new(state.session.transcript_mut())
        .pending(pending)
        .theme(theme.clone())
        .render(frame, chat_area);

    InputWidget::new(&state.input)
        .focused(true)
        .placeholder("Type a message...")
        .theme(theme.clone())
        .render(frame, input_area);

    let status = state.status_message();
    let status_style = if state.session.retryable().is_some() {
        theme.error_style()
    } else {
        match state.connection_state {
            ConnectionState::Checking => theme.warning_style(),
            ConnectionState::Reachable => theme.success_style(),
            ConnectionState::Unreachable => theme.error_style(),
        }
    };
    Footer::new(HELP)
        .status(&status, status_style)
        .theme(theme)
        .render(frame, footer_area);
}

/// Render the header line with the endpoint and sender.
fn render_header(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let (marker, marker_style) = match state.connection_state {
        ConnectionState::Checking => ("○", theme.warning_style()),
        ConnectionState::Reachable => ("●", theme.success_style()),
        ConnectionState::Unreachable => ("●", theme.error_style()),
    };

    let details = format!(
        " rasachat - {} as '{}'",
        state.webhook_url,
        state.session.sender()
    );
    let width = (area.width as usize).saturating_sub(2);

    let line = Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(truncate(&details, width), theme.focused_border()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
