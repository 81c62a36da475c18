/// Minimal append-at-tail edit buffer used by the transcript area and the
/// auth form fields.
///
/// Deliberately cursorless: characters are inserted at the end and Backspace
/// removes the last character. Pastes go through [`TextBuffer::insert_str`]
/// so multi-line content lands in one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Remove the last character, respecting UTF-8 boundaries.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
