//! The source buffer being edited: rope-backed text plus one selection.

use ropey::Rope;

use super::indent::IndentEdit;
use super::selection::Selection;

/// Text and selection of the file currently open for editing
///
/// Invariant: `selection.start <= selection.end <= len_chars()`. Every
/// mutator clamps to keep it.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    text: Rope,
    selection: Selection,
}

impl SourceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with the cursor at the start of `text`
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            selection: Selection::collapsed(0),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Full content as a String
    pub fn content(&self) -> String {
        self.text.to_string()
    }

    /// Replace the whole text and move the selection
    pub fn replace(&mut self, text: &str, selection: Selection) {
        self.text = Rope::from_str(text);
        self.selection = selection.clamped(self.text.len_chars());
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.text.len_chars());
    }

    /// Adopt the output of the indentation engine
    pub fn apply(&mut self, edit: IndentEdit) {
        self.text = edit.text;
        self.selection = edit.selection.clamped(self.text.len_chars());
    }
}
