//! Append-only message list with scroll tracking.

use crate::message::{ChatMessage, Origin};

/// Where the transcript view is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scroll {
    /// Pinned to the newest message.
    #[default]
    Bottom,
    /// Fixed line offset from the top.
    Offset(usize),
}

/// The visible message list.
///
/// Messages are only ever appended. The renderer reports the maximum scroll
/// extent each frame through [`Transcript::set_max_offset`].
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    scroll: Scroll,
    max_offset: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and scroll so it is visible.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.scroll = Scroll::Bottom;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages of the given origin, in insertion order.
    pub fn by_origin(&self, origin: Origin) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(move |m| m.origin() == origin)
    }

    pub fn scroll(&self) -> Scroll {
        self.scroll
    }

    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    /// Record the maximum scroll extent of the last rendered frame.
    pub fn set_max_offset(&mut self, max_offset: usize) {
        self.max_offset = max_offset;
        if let Scroll::Offset(offset) = self.scroll {
            if offset >= max_offset {
                self.scroll = Scroll::Bottom;
            }
        }
    }

    /// Resolved line offset of the top of the view.
    pub fn offset(&self) -> usize {
        match self.scroll {
            Scroll::Bottom => self.max_offset,
            Scroll::Offset(offset) => offset.min(self.max_offset),
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = Scroll::Offset(self.offset().saturating_sub(lines));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let target = self.offset().saturating_add(lines);
        self.scroll = if target >= self.max_offset {
            Scroll::Bottom
        } else {
            Scroll::Offset(target)
        };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = Scroll::Bottom;
    }
}
