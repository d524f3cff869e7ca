//! Character-cursor primitives shared by the value, component and document
//! parsers.
//!
//! The cursor is a `&str` tail of the source, advanced in place with `winnow`
//! token parsers. Every operation that looks for a token first skips
//! whitespace and `//` comments, so callers never re-see insignificant input.

use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Characters that may appear in an identifier-like run.
///
/// Deliberately permissive so `$C.@Name`, `@Style` and `kebab-case` read as
/// a single token.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '@' | '.' | '-')
}

/// Characters that end a bare scalar token.
fn is_value_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ';' | ':' | '=' | ',' | ')' | '}')
}

/// Take a (possibly empty) run of characters matching `pred`.
fn take_run<'a>(input: &mut &'a str, pred: impl Fn(char) -> bool) -> &'a str {
    take_while::<_, _, ContextError>(0.., pred)
        .parse_next(input)
        .unwrap_or_default()
}

/// Result of [`Scanner::read_quoted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoted<'a> {
    /// Text between the quotes, escapes left as written.
    pub text: &'a str,
    /// False when the input ended before the closing quote.
    pub terminated: bool,
}

/// A cursor over one source buffer.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    /// Byte offset of the cursor into the source.
    pub fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    /// Move the cursor back (or forward) to an offset previously returned by
    /// [`Scanner::offset`].
    pub fn rewind(&mut self, offset: usize) {
        self.rest = &self.source[offset..];
    }

    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn remaining(&self) -> &'a str {
        self.rest
    }

    /// Skip runs of whitespace and `//` line comments until neither applies.
    pub fn skip_insignificant(&mut self) {
        loop {
            let before = self.rest.len();
            self.rest = self.rest.trim_start();
            if self.rest.starts_with("//") {
                let _ = take_till::<_, _, ContextError>(0.., '\n').parse_next(&mut self.rest);
            }
            if self.rest.len() == before {
                break;
            }
        }
    }

    /// Skip insignificant input, then consume `literal` if it is next.
    ///
    /// The skip happens whether or not the literal matches.
    pub fn consume(&mut self, literal: &str) -> bool {
        self.skip_insignificant();
        match self.rest.strip_prefix(literal) {
            Some(after) => {
                self.rest = after;
                true
            }
            None => false,
        }
    }

    /// Like [`Scanner::consume`] but never advances past the literal.
    pub fn peek(&mut self, literal: &str) -> bool {
        self.skip_insignificant();
        self.rest.starts_with(literal)
    }

    /// Next significant character, without consuming it.
    pub fn peek_char(&mut self) -> Option<char> {
        self.skip_insignificant();
        self.rest.chars().next()
    }

    /// Consume exactly one character, whatever it is.
    pub fn advance_char(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        self.rest = chars.as_str();
        Some(c)
    }

    /// Maximal run of [`is_ident_char`] characters, after skipping
    /// insignificant input. May be empty.
    pub fn read_identifier(&mut self) -> &'a str {
        self.skip_insignificant();
        take_run(&mut self.rest, is_ident_char)
    }

    /// Maximal run of non-delimiter characters, after skipping insignificant
    /// input. May be empty.
    pub fn read_value_token(&mut self) -> &'a str {
        self.skip_insignificant();
        take_run(&mut self.rest, |c| !is_value_delimiter(c))
    }

    /// A `"`-delimited string starting at the cursor. A backslash always
    /// swallows the following character. Returns `None` if the cursor is not
    /// on a quote.
    pub fn read_quoted(&mut self) -> Option<Quoted<'a>> {
        self.skip_insignificant();
        let body = self.rest.strip_prefix('"')?;
        let mut scan = body;
        loop {
            let _ = take_run(&mut scan, |c| c != '"' && c != '\\');
            let mut chars = scan.chars();
            match chars.next() {
                Some('"') => {
                    let text = &body[..body.len() - scan.len()];
                    self.rest = chars.as_str();
                    return Some(Quoted {
                        text,
                        terminated: true,
                    });
                }
                Some(_) => {
                    // Backslash: drop it and whatever it escapes.
                    chars.next();
                    scan = chars.as_str();
                }
                None => {
                    self.rest = scan;
                    return Some(Quoted {
                        text: body,
                        terminated: false,
                    });
                }
            }
        }
    }

    /// `#` followed by a maximal alphanumeric run; returns the whole token
    /// including the `#`. Returns `None` if the cursor is not on `#`.
    pub fn read_color_token(&mut self) -> Option<&'a str> {
        self.skip_insignificant();
        let start = self.rest;
        let mut after = self.rest.strip_prefix('#')?;
        let digits = take_run(&mut after, char::is_alphanumeric);
        self.rest = after;
        Some(&start[..1 + digits.len()])
    }

    /// Everything up to (not including) the next `stop`, or the rest of the
    /// input when `stop` never occurs.
    pub fn read_until(&mut self, stop: char) -> &'a str {
        take_till::<_, _, ContextError>(0.., stop)
            .parse_next(&mut self.rest)
            .unwrap_or_default()
    }

    /// Skip a balanced `open ... close` region starting at the cursor, quoted
    /// strings included. Stops at end of input if the region never closes.
    pub fn skip_balanced(&mut self, open: char, close: char) {
        let mut depth = 0usize;
        loop {
            self.skip_insignificant();
            match self.rest.chars().next() {
                None => return,
                Some('"') => {
                    self.read_quoted();
                }
                Some(c) => {
                    self.advance_char();
                    if c == open {
                        depth += 1;
                    } else if c == close {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return;
                        }
                    } else if depth == 0 {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_and_comments() {
        let mut s = Scanner::new("  // one\n\t// two\n  Group");
        s.skip_insignificant();
        assert_eq!(s.remaining(), "Group");
    }

    #[test]
    fn comment_at_eof() {
        let mut s = Scanner::new("   // trailing");
        s.skip_insignificant();
        assert!(s.is_eof());
    }

    #[test]
    fn consume_keeps_skip_on_mismatch() {
        let mut s = Scanner::new("  // c\n  {");
        assert!(!s.consume("}"));
        assert_eq!(s.remaining(), "{");
        assert!(s.consume("{"));
        assert!(s.is_eof());
    }

    #[test]
    fn peek_does_not_advance() {
        let mut s = Scanner::new(" : x");
        assert!(s.peek(":"));
        assert!(s.peek(":"));
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn identifier_charset_is_permissive() {
        let mut s = Scanner::new("$C.@CheckBoxWithLabel #id");
        assert_eq!(s.read_identifier(), "$C.@CheckBoxWithLabel");
        assert_eq!(s.read_identifier(), "");
        assert_eq!(s.remaining(), "#id");
    }

    #[test]
    fn quoted_string_keeps_escapes() {
        let mut s = Scanner::new(r#""say \"hi\"" rest"#);
        let q = s.read_quoted().unwrap();
        assert_eq!(q.text, r#"say \"hi\""#);
        assert!(q.terminated);
        assert_eq!(s.remaining(), " rest");
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let mut s = Scanner::new(r#""abc\"#);
        let q = s.read_quoted().unwrap();
        assert!(!q.terminated);
        assert_eq!(q.text, r"abc\");
        assert!(s.is_eof());
    }

    #[test]
    fn color_token_includes_hash() {
        let mut s = Scanner::new("#336699(0.5)");
        assert_eq!(s.read_color_token(), Some("#336699"));
        assert_eq!(s.remaining(), "(0.5)");
        assert_eq!(Scanner::new("x").read_color_token(), None);
    }

    #[test]
    fn value_token_stops_at_delimiters() {
        let mut s = Scanner::new("12.5px;");
        assert_eq!(s.read_value_token(), "12.5px");
        assert_eq!(s.read_value_token(), "");
        assert_eq!(s.remaining(), ";");
    }

    #[test]
    fn rewind_restores_position() {
        let mut s = Scanner::new("Label { }");
        let mark = s.offset();
        s.read_identifier();
        s.rewind(mark);
        assert_eq!(s.remaining(), "Label { }");
    }

    #[test]
    fn skip_balanced_handles_nesting_and_strings() {
        let mut s = Scanner::new("{ a { \"}\" } } tail");
        s.skip_balanced('{', '}');
        assert_eq!(s.remaining(), " tail");

        let mut s = Scanner::new("(((");
        s.skip_balanced('(', ')');
        assert!(s.is_eof());
    }
}
