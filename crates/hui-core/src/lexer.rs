//! Flat token stream for syntax highlighting.
//!
//! A single non-recursive pass over the same grammar the parser reads. It is
//! used for presentation only: every byte of the input lands in exactly one
//! token, and nothing here feeds the document builder.

use crate::scanner::is_ident_char;
use serde::{Deserialize, Serialize};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Built-in element names highlighted differently from other words.
pub const ELEMENTS: &[&str] = &[
    "Group",
    "Label",
    "TextButton",
    "CheckBox",
    "CheckBoxWithLabel",
    "TextField",
    "NumberField",
    "Image",
    "ScrollGroup",
    "VBox",
    "HBox",
    "Style",
    "TextButtonStyle",
    "LabelStyle",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Whitespace,
    Comment,
    String,
    Number,
    LBrace,
    RBrace,
    Colon,
    Equals,
    Semicolon,
    Comma,
    LParen,
    RParen,
    /// `#` plus alphanumerics: a color literal or a component id.
    Hash,
    /// Word starting with `$`.
    Type,
    /// Known element name.
    Element,
    /// Word starting with `@`, or any word directly followed by `:`.
    Property,
    Identifier,
}

/// A token as a byte range into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Tokenize the whole input.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        let start = source.len() - rest.len();
        let kind = lex_one(c, &mut rest);
        tokens.push(Token {
            kind,
            start,
            end: source.len() - rest.len(),
        });
    }

    tokens
}

fn run<'a>(input: &mut &'a str, pred: impl Fn(char) -> bool) -> &'a str {
    take_while::<_, _, ContextError>(0.., pred)
        .parse_next(input)
        .unwrap_or_default()
}

fn bump(input: &mut &str, c: char) {
    *input = &input[c.len_utf8()..];
}

/// Lex one token starting with `c`, advancing `input` past it.
fn lex_one(c: char, input: &mut &str) -> TokenKind {
    match c {
        c if c.is_whitespace() => {
            run(input, char::is_whitespace);
            TokenKind::Whitespace
        }
        '/' if input.starts_with("//") => {
            let _ = take_till::<_, _, ContextError>(0.., '\n').parse_next(input);
            TokenKind::Comment
        }
        '"' => {
            bump(input, c);
            loop {
                run(input, |c| c != '"' && c != '\\');
                let mut chars = input.chars();
                match chars.next() {
                    Some('"') => {
                        *input = chars.as_str();
                        break;
                    }
                    Some(_) => {
                        chars.next();
                        *input = chars.as_str();
                    }
                    None => break,
                }
            }
            TokenKind::String
        }
        '{' | '}' | ':' | '=' | ';' | ',' | '(' | ')' => {
            bump(input, c);
            match c {
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                ':' => TokenKind::Colon,
                '=' => TokenKind::Equals,
                ';' => TokenKind::Semicolon,
                ',' => TokenKind::Comma,
                '(' => TokenKind::LParen,
                _ => TokenKind::RParen,
            }
        }
        '#' => {
            bump(input, c);
            run(input, char::is_alphanumeric);
            TokenKind::Hash
        }
        c if c.is_alphabetic() || c == '$' || c == '@' => {
            let word = run(input, is_ident_char);
            classify_word(word, input.starts_with(':'))
        }
        c if c.is_ascii_digit() || (c == '-' && starts_number(input)) => {
            bump(input, c);
            run(input, |c| c.is_ascii_digit() || c == '.');
            TokenKind::Number
        }
        _ => {
            bump(input, c);
            TokenKind::Identifier
        }
    }
}

fn starts_number(input: &str) -> bool {
    input[1..].starts_with(|c: char| c.is_ascii_digit())
}

fn classify_word(word: &str, before_colon: bool) -> TokenKind {
    if word.starts_with('$') {
        TokenKind::Type
    } else if word.starts_with('@') {
        TokenKind::Property
    } else if ELEMENTS.contains(&word) {
        TokenKind::Element
    } else if before_colon {
        TokenKind::Property
    } else {
        TokenKind::Identifier
    }
}
