//! Syntax highlighting module
//!
//! Lexical highlighting for contract sources (Python-flavoured):
//! - HTML escaping so source text can never inject markup
//! - A single left-to-right scanner producing classified spans
//! - Markup rendering for the read-only overlay
//!
//! ## Architecture
//!
//! ```text
//! raw source → escape_html → tokenize (spans over escaped text)
//!            → render_markup → overlay beneath the input surface
//! ```
//!
//! ## Precedence
//!
//! When classes could overlap the earlier one wins:
//! comment, string, number, keyword, definition name, operator, plain.

mod highlights;
mod markup;
mod scanner;

pub use highlights::{TokenKind, TokenSpan, KEYWORDS};
pub use markup::{escape_html, highlight, render_markup, Highlighted};
pub use scanner::tokenize;
