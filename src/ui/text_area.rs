use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditResult {
    Continue,
    Done,
}

/// Multi-line answer field with a char-indexed cursor. Editing is modal:
/// the practice view routes keys here while a field is focused for editing,
/// and Esc hands control back.
pub struct TextArea {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole content, cursor moved to the end. Used when
    /// populating fields from saved drafts and when clearing.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Cursor position as (line, column) in char units.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    pub fn handle(&mut self, key: KeyEvent) -> EditResult {
        match key.code {
            KeyCode::Esc => return EditResult::Done,
            KeyCode::Enter => self.insert('\n'),

            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::Home => {
                let (line, _) = self.cursor_line_col();
                self.cursor = self.line_starts()[line];
            }
            KeyCode::End => {
                let starts = self.line_starts();
                let (line, _) = self.cursor_line_col();
                self.cursor = starts[line] + self.line_len(line);
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let byte = self.char_to_byte(self.cursor - 1);
                    let ch = self.text[byte..].chars().next().unwrap();
                    self.text.replace_range(byte..byte + ch.len_utf8(), "");
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let byte = self.char_to_byte(self.cursor);
                    let ch = self.text[byte..].chars().next().unwrap();
                    self.text.replace_range(byte..byte + ch.len_utf8(), "");
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_back();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(ch);
            }
            _ => {}
        }
        EditResult::Continue
    }

    fn insert(&mut self, ch: char) {
        let byte = self.char_to_byte(self.cursor);
        self.text.insert(byte, ch);
        self.cursor += 1;
    }

    /// Char indices where each line begins.
    fn line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, ch) in self.text.chars().enumerate() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        starts
    }

    /// Length of the given line in chars, excluding the newline.
    fn line_len(&self, line: usize) -> usize {
        let starts = self.line_starts();
        let start = starts[line];
        let end = starts
            .get(line + 1)
            .map(|s| s - 1)
            .unwrap_or_else(|| self.char_count());
        end - start
    }

    fn move_vertical(&mut self, delta: i32) {
        let starts = self.line_starts();
        let (line, col) = self.cursor_line_col();
        let target = line as i32 + delta;
        if target < 0 || target >= starts.len() as i32 {
            return;
        }
        let target = target as usize;
        self.cursor = starts[target] + col.min(self.line_len(target));
    }

    /// Unix-word-rubout: skip whitespace back, then the word before it.
    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut new_cursor = self.cursor;
        while new_cursor > 0 && chars[new_cursor - 1].is_whitespace() {
            new_cursor -= 1;
        }
        while new_cursor > 0 && !chars[new_cursor - 1].is_whitespace() {
            new_cursor -= 1;
        }
        let start_byte = self.char_to_byte(new_cursor);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = new_cursor;
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(area: &mut TextArea, code: KeyCode) -> EditResult {
        area.handle(KeyEvent::from(code))
    }

    fn type_str(area: &mut TextArea, s: &str) {
        for ch in s.chars() {
            if ch == '\n' {
                press(area, KeyCode::Enter);
            } else {
                press(area, KeyCode::Char(ch));
            }
        }
    }

    #[test]
    fn typing_builds_text() {
        let mut area = TextArea::new();
        type_str(&mut area, "led the team");
        assert_eq!(area.value(), "led the team");
        assert_eq!(area.char_count(), 12);
    }

    #[test]
    fn enter_inserts_newline() {
        let mut area = TextArea::new();
        type_str(&mut area, "line one\nline two");
        assert_eq!(area.value(), "line one\nline two");
        assert_eq!(area.cursor_line_col(), (1, 8));
    }

    #[test]
    fn esc_exits_editing() {
        let mut area = TextArea::new();
        assert_eq!(press(&mut area, KeyCode::Esc), EditResult::Done);
    }

    #[test]
    fn backspace_handles_multibyte() {
        let mut area = TextArea::new();
        type_str(&mut area, "caf\u{e9}");
        press(&mut area, KeyCode::Backspace);
        assert_eq!(area.value(), "caf");
    }

    #[test]
    fn vertical_movement_clamps_to_line_length() {
        let mut area = TextArea::new();
        type_str(&mut area, "a long first line\nxy");
        // Cursor at end of short second line; move up keeps column 2.
        press(&mut area, KeyCode::Up);
        assert_eq!(area.cursor_line_col(), (0, 2));
        // And back down clamps to the short line's end.
        press(&mut area, KeyCode::End);
        press(&mut area, KeyCode::Down);
        assert_eq!(area.cursor_line_col(), (1, 2));
    }

    #[test]
    fn word_rubout_eats_trailing_space_and_word() {
        let mut area = TextArea::new();
        type_str(&mut area, "shipped the fix ");
        area.handle(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(area.value(), "shipped the ");
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut area = TextArea::new();
        area.set_text("restored draft");
        type_str(&mut area, "!");
        assert_eq!(area.value(), "restored draft!");
    }
}
