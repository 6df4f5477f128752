//! Theme and style definitions.

use ratatui::style::{Color, Modifier, Style};

use rasachat_core::Origin;

/// Theme configuration for the chat client.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (focused borders)
    pub accent: Color,
    /// Success color (connected)
    pub success: Color,
    /// Warning color (connecting, pending replies)
    pub warning: Color,
    /// Muted color (timestamps, hints)
    pub muted: Color,
    /// `user-message` color
    pub user: Color,
    /// `bot-message` color
    pub bot: Color,
    /// `error-message` color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            user: Color::Cyan,
            bot: Color::Green,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Header style for a message of the given origin.
    pub fn origin_style(&self, origin: Origin) -> Style {
        let color = match origin {
            Origin::User => self.user,
            Origin::Bot => self.bot,
            Origin::Error => self.error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Body style for a message of the given origin.
    pub fn body_style(&self, origin: Origin) -> Style {
        match origin {
            Origin::Error => Style::default().fg(self.error),
            Origin::User | Origin::Bot => Style::default(),
        }
    }
}
