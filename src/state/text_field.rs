//! Single-line text input with a cursor.
//!
//! Backs the search field and the API-key form. The cursor is a character
//! index (not a byte index) so multi-byte input edits cleanly.
//! Editing methods return `true` when the value changed, which is what the
//! caller forwards as a raw input-change event.

/// Editable text with a cursor position in `0..=char_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    /// Empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Field holding `value` with the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut field = Self::new();
        field.set_value(value);
        field
    }

    /// Current contents.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the field holds no text.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Insert a character at the cursor and advance it.
    pub fn insert(&mut self, ch: char) -> bool {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
        true
    }

    /// Empty the field.
    pub fn clear(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        changed
    }

    /// Cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Cursor one character right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Text before the cursor, used to place the terminal cursor.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_offset(self.cursor)]
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
#[path = "text_field_tests.rs"]
mod tests;
