//! Single-line text input for the phone number field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Text with a char-indexed cursor.
#[derive(Debug, Clone, Default)]
pub struct PhoneInput {
    text: String,
    cursor: usize,
}

impl PhoneInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text[..byte_idx].width()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn insert_char(&mut self, ch: char) {
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }

    pub fn delete_prev_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.remove(byte_idx);
        true
    }

    pub fn delete_next_char(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.remove(byte_idx);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Applies an editing key. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
                true
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }
}

fn char_to_byte_index(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map_or(text.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = PhoneInput::default();
        for ch in "0912".chars() {
            assert!(input.input(key(KeyCode::Char(ch))));
        }
        assert_eq!(input.text(), "0912");
        assert_eq!(input.cursor_column(), 4);

        assert!(input.input(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "091");
    }

    #[test]
    fn test_cursor_moves_do_not_change_text() {
        let mut input = PhoneInput::default();
        input.set_text("0912");

        assert!(!input.input(key(KeyCode::Home)));
        assert_eq!(input.cursor_column(), 0);
        assert!(!input.input(key(KeyCode::Backspace)));

        assert!(input.input(key(KeyCode::Delete)));
        assert_eq!(input.text(), "912");

        input.input(key(KeyCode::Right));
        input.insert_char('x');
        assert_eq!(input.text(), "9x12");

        input.input(key(KeyCode::End));
        assert!(!input.input(key(KeyCode::Delete)));
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let mut input = PhoneInput::default();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!input.input(ctrl_a));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_cursor_column_counts_display_width() {
        let mut input = PhoneInput::default();
        input.set_text("0漢9");
        assert_eq!(input.cursor_column(), 4);
        input.move_left();
        assert_eq!(input.cursor_column(), 3);
    }
}
