//! Escaping and overlay markup rendering

use super::highlights::TokenSpan;
use super::scanner::tokenize;

/// Escape text for embedding inside markup
///
/// Only `&`, `<` and `>` are rewritten; quotes are left alone so the scanner
/// still sees string delimiters.
pub fn escape_html(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + src.len() / 8);
    for ch in src.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escaped source text together with its classified spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub escaped: String,
    pub spans: Vec<TokenSpan>,
}

impl Highlighted {
    /// Text covered by a span
    pub fn text(&self, span: &TokenSpan) -> &str {
        &self.escaped[span.start..span.end]
    }

    /// Render the overlay markup: every non-plain span wrapped in a classed `<span>`
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.escaped.len() * 2);
        for span in &self.spans {
            let text = self.text(span);
            match span.kind.css_class() {
                Some(class) => {
                    out.push_str("<span class=\"");
                    out.push_str(class);
                    out.push_str("\">");
                    out.push_str(text);
                    out.push_str("</span>");
                }
                None => out.push_str(text),
            }
        }
        out
    }
}

/// Escape and classify raw source text
pub fn highlight(source: &str) -> Highlighted {
    let escaped = escape_html(source);
    let spans = tokenize(&escaped);
    Highlighted { escaped, spans }
}

/// Raw source text straight to overlay markup
pub fn render_markup(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    highlight(source).to_markup()
}
