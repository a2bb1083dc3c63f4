//! Main application state and logic

use recall_core::{Phase, RecallSession};

/// A single-line text buffer with a character cursor.
///
/// Cursor arithmetic is in characters, edits in bytes, so multi-byte
/// input stays safe.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Take the buffer contents, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = self
            .value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len());
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if let Some((byte_pos, ch)) = self.value.char_indices().nth(self.cursor) {
                self.value.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            if let Some((byte_pos, ch)) = self.value.char_indices().nth(self.cursor) {
                self.value.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// Main application state
pub struct App {
    /// The recall session driving the conversation.
    pub session: RecallSession,

    // Transcript display
    pub scroll: usize,
    pub scroll_locked_to_bottom: bool, // True = auto-scroll on new content

    // Input state
    pub input: TextField,

    // Status
    status_message: Option<String>,
    pub wants_reset: bool,

    /// A model call is in flight; input is ignored until it returns.
    pub busy: bool,

    /// A gateway failure halted the session; only quit/reset remain.
    pub halted: bool,
}

impl App {
    /// Create an application around a session that has already
    /// produced its first question.
    pub fn new(session: RecallSession) -> Self {
        Self {
            session,
            scroll: 0,
            scroll_locked_to_bottom: true,
            input: TextField::default(),
            status_message: None,
            wants_reset: false,
            busy: false,
            halted: false,
        }
    }

    /// Whether the input line currently accepts typing.
    pub fn input_enabled(&self) -> bool {
        !self.halted && !self.busy && self.session.phase() == Phase::Recalling
    }

    /// Submit current input, if any.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input.is_empty() {
            return None;
        }
        Some(self.input.take())
    }

    /// Stop the session after a fatal gateway failure.
    pub fn halt(&mut self, diagnostic: impl Into<String>) {
        self.halted = true;
        self.set_status(diagnostic);
    }

    /// Scroll transcript to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // Set to max value - the widget will cap it to actual max_scroll
        self.scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Estimate max scroll based on transcript content
    /// Uses conservative estimate assuming ~60 char effective width
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .session
            .transcript()
            .iter()
            .map(|entry| {
                entry
                    .text
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
                    + 1 // blank line between entries
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll transcript up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
        self.scroll = self.scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll transcript down
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.scroll = self.scroll.min(max_scroll + 100);
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Get the current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        for c in "hallo".chars() {
            field.insert(c);
        }
        assert_eq!(field.value(), "hallo");

        // Fix the typo in the middle.
        field.cursor_left();
        field.cursor_left();
        field.cursor_left();
        field.backspace();
        field.insert('e');
        assert_eq!(field.value(), "hello");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_text_field_multibyte() {
        let mut field = TextField::default();
        field.insert('기');
        field.insert('억');
        assert_eq!(field.value(), "기억");

        field.cursor_left();
        field.delete();
        assert_eq!(field.value(), "기");

        field.cursor_end();
        field.backspace();
        assert!(field.is_empty());
    }

    #[test]
    fn test_text_field_take() {
        let mut field = TextField::default();
        field.insert('a');
        field.insert('b');

        assert_eq!(field.take(), "ab");
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
    }
}
