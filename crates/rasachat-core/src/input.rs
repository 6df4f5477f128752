//! Editable input field state.

/// Text typed by the user but not yet submitted.
///
/// The cursor is a char index, so editing stays valid for multi-byte text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    value: String,
    cursor: usize,
}

impl InputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `value` with the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at(self.cursor);
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.remove_at(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Take the trimmed text for sending.
    ///
    /// Blank or whitespace-only input yields `None` and leaves the buffer as
    /// it was. Otherwise the buffer is cleared.
    pub fn take_submission(&mut self) -> Option<String> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.value.clear();
        self.cursor = 0;
        Some(text)
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn remove_at(&mut self, char_idx: usize) {
        if let Some((byte_idx, ch)) = self.value.char_indices().nth(char_idx) {
            self.value
                .replace_range(byte_idx..byte_idx + ch.len_utf8(), "");
        }
    }
}
