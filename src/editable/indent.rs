//! Tab / Shift+Tab handling over a buffer and its selection.
//!
//! Every function here is a pure transformation: the input rope is cloned
//! (cheap, structurally shared) and edited, never mutated in place.

use ropey::Rope;

use super::selection::Selection;

/// Widest indent unit accepted from configuration
pub const MAX_INDENT_WIDTH: usize = 16;

/// The indentation increment, a run of spaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentUnit {
    text: String,
}

impl IndentUnit {
    pub const DEFAULT_WIDTH: usize = 4;

    /// A unit of `width` spaces, clamped to `1..=MAX_INDENT_WIDTH`
    pub fn spaces(width: usize) -> Self {
        let width = width.clamp(1, MAX_INDENT_WIDTH);
        Self {
            text: " ".repeat(width),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for IndentUnit {
    fn default() -> Self {
        Self::spaces(Self::DEFAULT_WIDTH)
    }
}

/// Result of an indentation edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentEdit {
    pub text: Rope,
    pub selection: Selection,
}

/// Handle a Tab key press
///
/// With no selection a unit is inserted at the cursor whatever `shift` says.
/// With a selection every touched line is indented, or outdented when `shift`.
pub fn handle_tab(text: &Rope, selection: Selection, shift: bool, unit: &IndentUnit) -> IndentEdit {
    if selection.is_empty() {
        insert_unit(text, selection.start, unit)
    } else if shift {
        outdent_lines(text, selection, unit)
    } else {
        indent_lines(text, selection, unit)
    }
}

/// Insert one unit at `cursor`; the cursor moves past it
pub fn insert_unit(text: &Rope, cursor: usize, unit: &IndentUnit) -> IndentEdit {
    let cursor = cursor.min(text.len_chars());
    let mut out = text.clone();
    out.insert(cursor, unit.as_str());
    IndentEdit {
        text: out,
        selection: Selection::collapsed(cursor + unit.width()),
    }
}

/// Prepend one unit to every line the selection touches
///
/// The selection start stays where it was; the end grows by one unit per line.
pub fn indent_lines(text: &Rope, selection: Selection, unit: &IndentUnit) -> IndentEdit {
    let selection = selection.clamped(text.len_chars());
    let (first, last) = touched_lines(text, selection);
    let mut out = text.clone();

    // Highest line first so earlier offsets stay valid
    for line in (first..=last).rev() {
        let line_start = out.line_to_char(line);
        out.insert(line_start, unit.as_str());
    }

    let line_count = last - first + 1;
    IndentEdit {
        text: out,
        selection: Selection::new(selection.start, selection.end + unit.width() * line_count),
    }
}

/// Remove up to one unit of leading indentation from every touched line
///
/// A leading tab counts as a full unit. Lines with fewer leading spaces than
/// a unit lose only what they have; lines without any keep their text.
pub fn outdent_lines(text: &Rope, selection: Selection, unit: &IndentUnit) -> IndentEdit {
    let selection = selection.clamped(text.len_chars());
    let (first, last) = touched_lines(text, selection);
    let mut out = text.clone();
    let mut removed = 0;

    for line in (first..=last).rev() {
        let count = leading_indent_to_remove(&out, line, unit);
        if count > 0 {
            let line_start = out.line_to_char(line);
            out.remove(line_start..line_start + count);
            removed += count;
        }
    }

    let len = out.len_chars();
    let start = selection.start.min(len);
    let end = selection.end.saturating_sub(removed).max(start);
    IndentEdit {
        text: out,
        selection: Selection { start, end },
    }
}

/// First and last line (inclusive) intersected by the selection
fn touched_lines(text: &Rope, selection: Selection) -> (usize, usize) {
    (
        text.char_to_line(selection.start),
        text.char_to_line(selection.end),
    )
}

fn leading_indent_to_remove(text: &Rope, line: usize, unit: &IndentUnit) -> usize {
    let mut chars = text.line(line).chars();
    match chars.next() {
        Some('\t') => 1,
        Some(' ') => 1 + chars.take_while(|c| *c == ' ').take(unit.width() - 1).count(),
        _ => 0,
    }
}
