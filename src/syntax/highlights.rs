//! Syntax highlighting data structures
//!
//! Defines token kinds and the spans the scanner produces.

/// Reserved words highlighted as keywords
pub const KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "return", "if", "elif", "else", "for", "while", "try",
    "except", "finally", "with", "as", "pass", "break", "continue", "lambda", "True", "False",
    "None", "and", "or", "not", "in", "is",
];

/// Classification of a span of escaped source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Keyword,
    /// Name introduced by `def` or `class`
    Definition,
    Operator,
    Plain,
}

impl TokenKind {
    /// CSS class used by the overlay, `None` for plain text
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Comment => Some("cm-comment"),
            TokenKind::String => Some("cm-string"),
            TokenKind::Number => Some("cm-number"),
            TokenKind::Keyword => Some("cm-keyword"),
            TokenKind::Definition => Some("cm-def"),
            TokenKind::Operator => Some("cm-operator"),
            TokenKind::Plain => None,
        }
    }

    pub fn is_keyword(word: &str) -> bool {
        KEYWORDS.contains(&word)
    }
}

/// A classified slice of the escaped text
///
/// `start`/`end` are byte offsets into the escaped text (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { kind, start, end }
    }
}
