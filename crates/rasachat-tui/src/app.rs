//! Application state and main event loop.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use rasachat_core::{ChatError, PendingSend};

use crate::event::{BackendCommand, UiEvent};
use crate::state::UiState;
use crate::ui;

/// Lines moved by PageUp/PageDown.
const PAGE: usize = 10;

/// Main application with UI state and channel handles.
pub struct App {
    /// UI state, mutated only on this thread.
    state: UiState,

    /// Receiver for events from the backend.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for commands to the backend.
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl App {
    /// Create a new application instance with channel handles.
    pub fn new(
        state: UiState,
        ui_rx: mpsc::Receiver<UiEvent>,
        cmd_tx: mpsc::Sender<BackendCommand>,
    ) -> Self {
        Self {
            state,
            ui_rx,
            cmd_tx,
        }
    }

    /// Run the main event loop.
    ///
    /// This runs on the main thread and handles:
    /// - Drawing the UI
    /// - Processing keyboard input
    /// - Receiving replies from the backend
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &mut self.state))?;

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            // Process backend events (non-blocking)
            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }

            if self.state.should_quit {
                break;
            }
        }

        let _ = self.cmd_tx.blocking_send(BackendCommand::Quit);

        Ok(())
    }

    /// Apply an event from the backend to the UI state.
    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ReplyReceived { seq, result } => {
                debug!(seq, ok = result.is_ok(), "Reply received");
                self.state.session.complete(seq, result);
            }
            UiEvent::ConnectionStateChanged(new_state) => {
                self.state.connection_state = new_state;
            }
        }
    }

    /// Handle a key press.
    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char('c') if ctrl => self.state.should_quit = true,

            // Retry the last recoverable failure
            KeyCode::Char('r') if ctrl => {
                if let Some(pending) = self.state.session.retry() {
                    self.dispatch(pending);
                }
            }

            // Jump to the newest message
            KeyCode::Char('l') if ctrl => {
                self.state.session.transcript_mut().scroll_to_bottom();
            }

            KeyCode::F(5) => {
                let _ = self.cmd_tx.blocking_send(BackendCommand::Ping);
            }

            KeyCode::Enter => {
                if let Some(pending) = self.state.session.submit(&mut self.state.input) {
                    self.dispatch(pending);
                }
            }

            // Transcript scrolling
            KeyCode::Up => self.state.session.transcript_mut().scroll_up(1),
            KeyCode::Down => self.state.session.transcript_mut().scroll_down(1),
            KeyCode::PageUp => self.state.session.transcript_mut().scroll_up(PAGE),
            KeyCode::PageDown => self.state.session.transcript_mut().scroll_down(PAGE),

            // Field editing
            KeyCode::Char(c) if !ctrl => self.state.input.insert(c),
            KeyCode::Backspace => self.state.input.backspace(),
            KeyCode::Delete => self.state.input.delete(),
            KeyCode::Left => self.state.input.move_left(),
            KeyCode::Right => self.state.input.move_right(),
            KeyCode::Home => self.state.input.move_home(),
            KeyCode::End => self.state.input.move_end(),

            _ => {}
        }
    }

    /// Hand a send to the backend, rendering a failure if it is gone.
    fn dispatch(&mut self, pending: PendingSend) {
        let seq = pending.seq;
        if self.cmd_tx.blocking_send(BackendCommand::Send(pending)).is_err() {
            warn!(seq, "Backend unavailable, send dropped");
            self.state.session.complete(
                seq,
                Err(ChatError::Network("background worker stopped".to_string())),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rasachat_core::{BotReply, ChatSession, DeliveryOrder, Origin};

    use super::*;

    fn new_app() -> (App, mpsc::Sender<UiEvent>, mpsc::Receiver<BackendCommand>) {
        let (ui_tx, ui_rx) = mpsc::channel(16);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let state = UiState::new(
            ChatSession::new("user", DeliveryOrder::Completion),
            "http://localhost:5005/webhooks/rest/webhook",
        );
        (App::new(state, ui_rx, cmd_tx), ui_tx, cmd_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_renders_then_dispatches() {
        let (mut app, _ui_tx, mut cmd_rx) = new_app();
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);

        let messages = app.state.session.transcript().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].origin(), Origin::User);
        assert!(app.state.input.is_empty());

        match cmd_rx.try_recv().unwrap() {
            BackendCommand::Send(pending) => {
                assert_eq!(pending.request.sender, "user");
                assert_eq!(pending.request.message, "Hello");
            }
            other => panic!("Expected Send, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_enter_is_noop() {
        let (mut app, _ui_tx, mut cmd_rx) = new_app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.state.session.transcript().is_empty());
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn test_reply_event_renders_bot_messages() {
        let (mut app, _ui_tx, mut cmd_rx) = new_app();
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);
        let seq = match cmd_rx.try_recv().unwrap() {
            BackendCommand::Send(pending) => pending.seq,
            other => panic!("Expected Send, got {:?}", other),
        };

        app.apply_event(UiEvent::ReplyReceived {
            seq,
            result: Ok(vec![BotReply::text("user", "A"), BotReply::text("user", "B")]),
        });

        let bots: Vec<&str> = app
            .state
            .session
            .transcript()
            .by_origin(Origin::Bot)
            .map(|m| m.text())
            .collect();
        assert_eq!(bots, vec!["A", "B"]);
    }

    #[test]
    fn test_ctrl_r_retries_after_network_error() {
        let (mut app, _ui_tx, mut cmd_rx) = new_app();
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);
        let seq = match cmd_rx.try_recv().unwrap() {
            BackendCommand::Send(pending) => pending.seq,
            other => panic!("Expected Send, got {:?}", other),
        };

        app.apply_event(UiEvent::ReplyReceived {
            seq,
            result: Err(ChatError::Network("refused".to_string())),
        });
        assert_eq!(app.state.session.transcript().by_origin(Origin::Error).count(), 1);
        assert!(app.state.status_message().contains("Ctrl+R"));

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        match cmd_rx.try_recv().unwrap() {
            BackendCommand::Send(pending) => assert_eq!(pending.request.message, "Hello"),
            other => panic!("Expected Send, got {:?}", other),
        }
        assert_eq!(app.state.session.transcript().by_origin(Origin::User).count(), 1);
        assert!(app.state.input.is_empty());
    }

    #[test]
    fn test_dead_backend_renders_error() {
        let (mut app, _ui_tx, cmd_rx) = new_app();
        drop(cmd_rx);
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);

        let messages = app.state.session.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].origin(), Origin::Error);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _ui_tx, _cmd_rx) = new_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.state.should_quit);

        let (mut app, _ui_tx, _cmd_rx) = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.state.should_quit);
        assert!(app.state.input.is_empty());
    }
}
