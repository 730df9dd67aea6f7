//! Lexical scanner over escaped source text
//!
//! Walks the text once, left to right. At each position the first matching
//! class wins (comment, string, number, word, operator), so a `#` inside a
//! string literal stays part of the string while a quote inside a comment
//! stays part of the comment.

use super::highlights::{TokenKind, TokenSpan};

/// Entities produced by [`super::escape_html`]. Never split by a span boundary.
const ENTITIES: &[&str] = &["&amp;", "&lt;", "&gt;"];

/// Two-character operators, written in their escaped form where needed
const COMPOUND_OPERATORS: &[&str] = &["==", "!=", "&lt;=", "&gt;=", "+=", "-=", "*=", "/="];

const SINGLE_OPERATORS: &[u8] = b"+-*/%=.:()[]{}";

/// Classify already-escaped text into spans
///
/// The result covers `0..escaped.len()` with no gaps or overlaps and adjacent
/// plain runs merged. Never fails: unterminated strings run to the end of
/// their line (or of the text, for triple-quoted strings).
pub fn tokenize(escaped: &str) -> Vec<TokenSpan> {
    Scanner::new(escaped).run()
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    spans: Vec<TokenSpan>,
    /// Set after `def`/`class`, cleared by the next non-whitespace token
    expect_definition: bool,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            spans: Vec::new(),
            expect_definition: false,
        }
    }

    fn run(mut self) -> Vec<TokenSpan> {
        while self.pos < self.src.len() {
            self.step();
        }
        self.spans
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn step(&mut self) {
        let rest = self.rest();
        let Some(ch) = rest.chars().next() else {
            return;
        };

        if ch == '#' {
            let len = rest.find('\n').unwrap_or(rest.len());
            return self.emit(TokenKind::Comment, self.pos + len);
        }

        if rest.starts_with("'''") || rest.starts_with("\"\"\"") {
            let end = self.triple_quoted_end(&rest[..3]);
            return self.emit(TokenKind::String, end);
        }

        if ch == '\'' || ch == '"' {
            let end = self.quoted_end(ch);
            return self.emit(TokenKind::String, end);
        }

        if let Some(end) = self.number_end() {
            return self.emit(TokenKind::Number, end);
        }

        if ch.is_ascii_digit() {
            // Digits glued to letters (`1st`, `0xZZ`) are not numbers
            let end = self.pos + ident_run_len(rest);
            return self.emit(TokenKind::Plain, end);
        }

        if is_ident_start(ch) {
            return self.word();
        }

        if let Some(op) = COMPOUND_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            return self.emit(TokenKind::Operator, self.pos + op.len());
        }

        if ch.is_ascii() && SINGLE_OPERATORS.contains(&(ch as u8)) {
            return self.emit(TokenKind::Operator, self.pos + 1);
        }

        if let Some(entity) = ENTITIES.iter().find(|e| rest.starts_with(**e)) {
            return self.emit(TokenKind::Plain, self.pos + entity.len());
        }

        if ch.is_whitespace() {
            let len = rest
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            return self.push(TokenKind::Plain, self.pos + len);
        }

        self.emit(TokenKind::Plain, self.pos + ch.len_utf8());
    }

    /// End of a `'''`/`"""` string, or end of text when unterminated
    fn triple_quoted_end(&self, delimiter: &str) -> usize {
        let body = &self.rest()[3..];
        match body.find(delimiter) {
            Some(idx) => self.pos + 3 + idx + 3,
            None => self.src.len(),
        }
    }

    /// End of a single-line string; backslash escapes the next character
    fn quoted_end(&self, quote: char) -> usize {
        let rest = self.rest();
        let mut chars = rest.char_indices().skip(1);
        while let Some((idx, c)) = chars.next() {
            match c {
                '\n' => return self.pos + idx,
                '\\' => {
                    if let Some((next_idx, next)) = chars.next() {
                        if next == '\n' {
                            return self.pos + next_idx;
                        }
                    }
                }
                c if c == quote => return self.pos + idx + c.len_utf8(),
                _ => {}
            }
        }
        self.src.len()
    }

    /// Hex (`0x1f`) or decimal (`12`, `1.5`, `.5`) literal ending on a word boundary
    fn number_end(&self) -> Option<usize> {
        let bytes = self.rest().as_bytes();
        let digits_from = |mut i: usize, hex: bool| {
            while bytes
                .get(i)
                .is_some_and(|b| if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() })
            {
                i += 1;
            }
            i
        };
        let is_digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

        let len = if bytes.starts_with(b"0x") && bytes.get(2).is_some_and(u8::is_ascii_hexdigit) {
            digits_from(2, true)
        } else if is_digit_at(0) {
            let int_end = digits_from(0, false);
            if bytes.get(int_end) == Some(&b'.') && is_digit_at(int_end + 1) {
                digits_from(int_end + 1, false)
            } else {
                int_end
            }
        } else if bytes.first() == Some(&b'.') && is_digit_at(1) {
            digits_from(1, false)
        } else {
            return None;
        };

        let boundary = self.src[self.pos + len..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_continue(c));
        boundary.then_some(self.pos + len)
    }

    fn word(&mut self) {
        let len = ident_run_len(self.rest());
        let word = &self.rest()[..len];
        let end = self.pos + len;

        if TokenKind::is_keyword(word) {
            self.emit(TokenKind::Keyword, end);
            self.expect_definition = matches!(word, "def" | "class");
        } else if self.expect_definition {
            self.emit(TokenKind::Definition, end);
        } else {
            self.emit(TokenKind::Plain, end);
        }
    }

    /// Push a span and end any pending `def`/`class` context
    fn emit(&mut self, kind: TokenKind, end: usize) {
        self.push(kind, end);
        self.expect_definition = false;
    }

    fn push(&mut self, kind: TokenKind, end: usize) {
        debug_assert!(end > self.pos, "scanner must always advance");
        if kind == TokenKind::Plain {
            if let Some(last) = self.spans.last_mut() {
                if last.kind == TokenKind::Plain && last.end == self.pos {
                    last.end = end;
                    self.pos = end;
                    return;
                }
            }
        }
        self.spans.push(TokenSpan::new(kind, self.pos, end));
        self.pos = end;
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Byte length of the identifier-like run at the start of `s`
fn ident_run_len(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| !is_ident_continue(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    /// Collect (kind, text) pairs for the non-plain spans
    fn classified(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src)
            .into_iter()
            .filter(|s| s.kind != Plain)
            .map(|s| (s.kind, &src[s.start..s.end]))
            .collect()
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            classified("x = 1 # note\ny"),
            vec![(Operator, "="), (Number, "1"), (Comment, "# note")]
        );
    }

    #[test]
    fn test_hash_inside_string_is_string() {
        assert_eq!(classified("'a # b'"), vec![(String, "'a # b'")]);
    }

    #[test]
    fn test_quote_inside_comment_is_comment() {
        assert_eq!(classified("# it's fine"), vec![(Comment, "# it's fine")]);
    }

    #[test]
    fn test_triple_quoted_spans_lines() {
        let src = "s = \"\"\"one\ntwo\"\"\" + 1";
        assert_eq!(
            classified(src),
            vec![
                (Operator, "="),
                (String, "\"\"\"one\ntwo\"\"\""),
                (Operator, "+"),
                (Number, "1"),
            ]
        );
    }

    #[test]
    fn test_unterminated_triple_quote_runs_to_end() {
        assert_eq!(classified("'''open\nstill"), vec![(String, "'''open\nstill")]);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        assert_eq!(classified(r#""a\"b" x"#), vec![(String, r#""a\"b""#)]);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        assert_eq!(
            classified("'abc\nreturn"),
            vec![(String, "'abc"), (Keyword, "return")]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            classified("0x1F 12 3.25 .5"),
            vec![(Number, "0x1F"), (Number, "12"), (Number, "3.25"), (Number, ".5")]
        );
    }

    #[test]
    fn test_digits_inside_identifiers_are_plain() {
        assert!(classified("x1 = y2").iter().all(|(k, _)| *k == Operator));
        assert!(classified("1st").is_empty());
    }

    #[test]
    fn test_trailing_dot_is_operator() {
        assert_eq!(classified("1.real"), vec![(Number, "1"), (Operator, "."),]);
    }

    #[test]
    fn test_def_and_class_names() {
        assert_eq!(
            classified("def transfer(self):"),
            vec![
                (Keyword, "def"),
                (Definition, "transfer"),
                (Operator, "("),
                (Operator, ")"),
                (Operator, ":"),
            ]
        );
        assert_eq!(
            classified("class  Token:"),
            vec![(Keyword, "class"), (Definition, "Token"), (Operator, ":")]
        );
    }

    #[test]
    fn test_keyword_after_def_stays_keyword() {
        assert_eq!(classified("def if"), vec![(Keyword, "def"), (Keyword, "if")]);
    }

    #[test]
    fn test_escaped_comparisons_are_operators() {
        assert_eq!(
            classified("a &lt;= b &gt; c"),
            vec![(Operator, "&lt;=")]
        );
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(
            classified("a += 1 != 2"),
            vec![
                (Operator, "+="),
                (Number, "1"),
                (Operator, "!="),
                (Number, "2")
            ]
        );
    }

    #[test]
    fn test_plain_runs_are_merged() {
        let spans = tokenize("foo bar baz");
        assert_eq!(spans, vec![TokenSpan::new(Plain, 0, 11)]);
    }

    #[test]
    fn test_non_ascii_identifiers() {
        let src = "größe = 1";
        let spans = tokenize(src);
        assert_eq!(spans.last().map(|s| s.end), Some(src.len()));
        assert_eq!(classified(src), vec![(Operator, "="), (Number, "1")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
