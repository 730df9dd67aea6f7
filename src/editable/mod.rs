//! Text editing primitives for the source editor.
//!
//! - [`SourceBuffer`]: rope-backed text plus a single selection, with the
//!   `start <= end <= len` invariant enforced on every mutation
//! - [`Selection`]: a pair of character offsets
//! - [`indent`]: the Tab / Shift+Tab engine, pure functions over a rope
//!
//! # Example
//!
//! ```
//! use axide::editable::{handle_tab, IndentUnit, Selection, SourceBuffer};
//!
//! let mut buffer = SourceBuffer::with_text("pass");
//! let edit = handle_tab(buffer.rope(), Selection::collapsed(0), false, &IndentUnit::default());
//! buffer.apply(edit);
//!
//! assert_eq!(buffer.content(), "    pass");
//! ```

mod buffer;
pub mod indent;
mod selection;

pub use buffer::SourceBuffer;
pub use indent::{handle_tab, indent_lines, insert_unit, outdent_lines, IndentEdit, IndentUnit};
pub use selection::Selection;
