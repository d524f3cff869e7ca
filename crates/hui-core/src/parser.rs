//! Tolerant recursive-descent parser for HUI markup → [`Document`].
//!
//! Handles: `//` comments, `$Name = ...;` declarations, `@Name = value;`
//! global styles, and a tree of `Type #id { ... }` components whose bodies
//! mix `Key: value` / `Key = value` properties with child components.
//!
//! The parser never fails. Malformed bytes are skipped, unterminated
//! constructs are closed at end of input, and every loop runs on a step
//! budget so any finite input terminates. What happened along the way is
//! reported as [`ParseDiagnostic`]s next to the document.

use crate::model::*;
use crate::promote::promote;
use crate::resolve::StyleScope;
use crate::scanner::Scanner;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ─── Options ─────────────────────────────────────────────────────────────

/// Safety budgets for [`parse_with`].
///
/// Budgets count loop iterations, not time, so results are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Entries read per `( ... )` group before giving up on it.
    pub group_steps: usize,
    /// Items read per component body before giving up on it.
    pub body_steps: usize,
    /// Top-level declarations read before returning what was accumulated.
    pub document_steps: usize,
    /// Deepest nesting of groups and components that is parsed; deeper
    /// regions are skipped as balanced text.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            group_steps: 10_000,
            body_steps: 10_000,
            document_steps: 100_000,
            max_depth: 256,
        }
    }
}

// ─── Diagnostics ─────────────────────────────────────────────────────────

/// What kind of recovery the parser performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A byte that could not start any token was dropped.
    SkippedChar,
    /// A `(` group reached end of input without its `)`.
    UnterminatedGroup,
    /// A component body reached end of input without its `}`.
    UnterminatedBody,
    /// A string literal reached end of input without its closing `"`.
    UnterminatedString,
    /// A loop hit its step budget and stopped early.
    BudgetExhausted,
    /// Nesting exceeded `max_depth`; the region was skipped.
    TooDeep,
}

/// One recovery event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset where the event happened.
    pub offset: usize,
    pub message: String,
}

/// Everything produced by one parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutput {
    pub document: Document,
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Style names that at least one `@name` reference resolved to.
    pub used_styles: BTreeSet<String>,
    /// `(start, end)` spans of top-level components after the first; they
    /// are parsed and then dropped.
    pub discarded: Vec<(usize, usize)>,
}

impl ParseOutput {
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }
}

// ─── Entry points ────────────────────────────────────────────────────────

/// Parse a document with default budgets, discarding diagnostics.
#[must_use = "parsing result should be used"]
pub fn parse_document(input: &str) -> Document {
    parse_with(input, &ParseOptions::default()).document
}

/// Parse a document, returning the diagnostics and reference bookkeeping
/// alongside it.
#[must_use = "parsing result should be used"]
pub fn parse_with(input: &str, options: &ParseOptions) -> ParseOutput {
    let mut parser = Parser::new(input, *options);
    let (imports, root) = parser.parse_top_level();
    let (styles, used_styles) = parser.scope.finish();
    ParseOutput {
        document: Document {
            imports,
            styles,
            root,
        },
        diagnostics: parser.diagnostics,
        used_styles,
        discarded: parser.discarded,
    }
}

/// Parse a single value expression in isolation (no styles in scope).
#[must_use]
pub fn parse_value(input: &str) -> Value {
    Parser::new(input, ParseOptions::default()).value()
}

// ─── Parser ──────────────────────────────────────────────────────────────

/// Countdown of loop iterations.
struct Budget(usize);

impl Budget {
    fn tick(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(left) => {
                self.0 = left;
                true
            }
            None => false,
        }
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    options: ParseOptions,
    scope: StyleScope,
    diagnostics: Vec<ParseDiagnostic>,
    discarded: Vec<(usize, usize)>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(input),
            options,
            scope: StyleScope::new(),
            diagnostics: Vec::new(),
            discarded: Vec::new(),
            depth: 0,
        }
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize, message: String) {
        log::debug!("{kind:?} at {offset}: {message}");
        self.diagnostics.push(ParseDiagnostic {
            kind,
            offset,
            message,
        });
    }

    /// Drop one malformed character so the enclosing loop can resync.
    fn skip_char(&mut self) {
        let offset = self.scanner.offset();
        if let Some(c) = self.scanner.advance_char() {
            self.report(
                DiagnosticKind::SkippedChar,
                offset,
                format!("unexpected `{c}`"),
            );
        }
    }

    // ─── Document ────────────────────────────────────────────────────────

    fn parse_top_level(&mut self) -> (Vec<String>, Option<Component>) {
        let mut imports = Vec::new();
        let mut root: Option<Component> = None;
        let mut budget = Budget(self.options.document_steps);

        loop {
            self.scanner.skip_insignificant();
            if self.scanner.is_eof() {
                break;
            }
            if !budget.tick() {
                let offset = self.scanner.offset();
                self.report(
                    DiagnosticKind::BudgetExhausted,
                    offset,
                    "document step budget exhausted; stopping early".into(),
                );
                break;
            }

            match self.scanner.peek_char() {
                Some('$') => {
                    let decl = self.scanner.read_until(';').trim();
                    if decl.contains('=') {
                        log::trace!("declaration `{decl}`");
                        imports.push(decl.to_string());
                    }
                    self.scanner.consume(";");
                }
                Some('@') => {
                    let mark = self.scanner.offset();
                    let name = self.scanner.read_identifier();
                    if self.scanner.consume("=") {
                        let value = self.value();
                        log::trace!("style `{name}` = {}", value.kind_name());
                        self.scope.define(name, value);
                        self.scanner.consume(";");
                    } else {
                        self.scanner.rewind(mark);
                        let component = self.component();
                        self.place_top_level(&mut root, component);
                    }
                }
                _ => {
                    let mark = self.scanner.offset();
                    if self.scanner.read_identifier().is_empty() {
                        self.skip_char();
                    } else {
                        self.scanner.rewind(mark);
                        let component = self.component();
                        self.place_top_level(&mut root, component);
                    }
                }
            }
        }

        (imports, root)
    }

    /// First top-level component becomes the root; later ones are dropped.
    fn place_top_level(&mut self, root: &mut Option<Component>, component: Component) {
        if root.is_none() {
            *root = Some(component);
        } else {
            log::debug!(
                "discarding extra top-level `{}` at {}",
                component.type_name,
                component.start_offset
            );
            self.discarded
                .push((component.start_offset, component.end_offset));
        }
    }

    // ─── Components ──────────────────────────────────────────────────────

    fn component(&mut self) -> Component {
        self.scanner.skip_insignificant();
        let start = self.scanner.offset();
        let raw = self.scanner.read_identifier();
        let mut component = Component::new(normalize_type(raw));
        component.start_offset = start;

        let mut header_end = self.scanner.offset();
        if self.scanner.consume("#") {
            component.id = Some(self.scanner.read_identifier().to_string());
            header_end = self.scanner.offset();
        }

        if !self.scanner.peek("{") {
            component.end_offset = header_end;
            return component;
        }

        if self.depth >= self.options.max_depth {
            let offset = self.scanner.offset();
            self.report(
                DiagnosticKind::TooDeep,
                offset,
                format!("body of `{}` nested too deeply; skipped", component.type_name),
            );
            self.scanner.skip_balanced('{', '}');
            component.end_offset = self.scanner.offset();
            return component;
        }

        self.scanner.consume("{");
        self.depth += 1;
        self.component_body(&mut component);
        self.depth -= 1;
        component.end_offset = self.scanner.offset();
        component
    }

    fn component_body(&mut self, component: &mut Component) {
        let mut budget = Budget(self.options.body_steps);

        loop {
            if self.scanner.consume("}") {
                return;
            }
            if self.scanner.is_eof() {
                let offset = self.scanner.offset();
                self.report(
                    DiagnosticKind::UnterminatedBody,
                    offset,
                    format!("missing `}}` for `{}`", component.type_name),
                );
                return;
            }
            if !budget.tick() {
                let offset = self.scanner.offset();
                self.report(
                    DiagnosticKind::BudgetExhausted,
                    offset,
                    format!("body of `{}` exceeded its step budget", component.type_name),
                );
                self.scanner.consume("}");
                return;
            }

            let mark = self.scanner.offset();
            let ident = self.scanner.read_identifier();
            if ident.is_empty() {
                self.skip_char();
                continue;
            }

            if self.scanner.consume(":") {
                let value = self.value();
                component.properties.insert(ident.to_string(), value);
            } else if self.scanner.consume("=") {
                let value = self.value();
                component.properties.insert(assigned_key(ident), value);
            } else {
                self.scanner.rewind(mark);
                let child = self.component();
                component.children.push(child);
                continue;
            }
            self.scanner.consume(";");
        }
    }

    // ─── Values ──────────────────────────────────────────────────────────

    /// Parse one value expression and resolve its `@` references.
    fn value(&mut self) -> Value {
        let raw = self.raw_value();
        self.scope.resolve(raw)
    }

    fn raw_value(&mut self) -> Value {
        match self.scanner.peek_char() {
            Some('(') => self.group_value(),
            Some('"') => self.string_value(),
            Some('#') => self.color_value(),
            _ => {
                let token = self.scanner.read_value_token();
                if self.scanner.peek("(") {
                    let inner = self.group_value();
                    return constructor(token, inner);
                }
                classify_scalar(token)
            }
        }
    }

    fn string_value(&mut self) -> Value {
        let offset = self.scanner.offset();
        match self.scanner.read_quoted() {
            Some(q) => {
                if !q.terminated {
                    self.report(
                        DiagnosticKind::UnterminatedString,
                        offset,
                        "string literal is missing its closing `\"`".into(),
                    );
                }
                Value::String(q.text.to_string())
            }
            None => Value::String(String::new()),
        }
    }

    fn color_value(&mut self) -> Value {
        let token = self.scanner.read_color_token().unwrap_or("#");
        let mut alpha = 1.0f32;
        if self.scanner.consume("(") {
            alpha = self.scanner.read_until(')').trim().parse().unwrap_or(1.0);
            self.scanner.consume(")");
        }
        Value::Color(Color::new(&token[1..], alpha))
    }

    /// `( ... )` at the cursor, promoted by shape.
    fn group_value(&mut self) -> Value {
        if self.depth >= self.options.max_depth {
            let offset = self.scanner.offset();
            self.report(
                DiagnosticKind::TooDeep,
                offset,
                "group nested too deeply; skipped".into(),
            );
            self.scanner.skip_balanced('(', ')');
            return Value::Group(Group::new());
        }
        self.depth += 1;
        let group = self.group_entries();
        self.depth -= 1;
        promote(group)
    }

    fn group_entries(&mut self) -> Group {
        let open = self.scanner.offset();
        self.scanner.consume("(");
        let mut map = Group::new();
        let mut budget = Budget(self.options.group_steps);

        loop {
            if self.scanner.consume(")") {
                return map;
            }
            if self.scanner.is_eof() {
                self.report(
                    DiagnosticKind::UnterminatedGroup,
                    open,
                    "group is missing its closing `)`".into(),
                );
                return map;
            }
            if !budget.tick() {
                let offset = self.scanner.offset();
                self.report(
                    DiagnosticKind::BudgetExhausted,
                    offset,
                    "group exceeded its step budget".into(),
                );
                self.scanner.consume(")");
                return map;
            }

            let key = self.scanner.read_identifier();
            if !key.is_empty() && (self.scanner.consume(":") || self.scanner.consume("=")) {
                let value = self.value();
                map.insert(key.to_string(), value);
            } else if self.scanner.peek("(") {
                let inner = self.group_value();
                let inner = self.scope.resolve(inner);
                if key.is_empty() {
                    map.insert(positional_key(&map), inner);
                } else {
                    map.insert(key.to_string(), constructor(key, inner));
                }
            } else if !key.is_empty() {
                let value = self.scope.resolve(classify_scalar(key));
                map.insert(positional_key(&map), value);
            } else if matches!(self.scanner.peek_char(), Some('"' | '#')) {
                let value = self.value();
                map.insert(positional_key(&map), value);
            } else if !matches!(self.scanner.peek_char(), Some(',' | ';' | ')') | None) {
                self.skip_char();
            }

            self.scanner.consume(",");
            self.scanner.consume(";");
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Strip namespace/override prefixes: `$C.@CheckBox` → `CheckBox`,
/// `@Button` → `Button`. Falls back to the raw text if stripping would
/// leave nothing.
pub fn normalize_type(raw: &str) -> String {
    let stripped = match raw.rfind(".@") {
        Some(at) => &raw[at + 2..],
        None => raw.strip_prefix('@').unwrap_or(raw),
    };
    if stripped.is_empty() {
        raw.to_string()
    } else {
        stripped.to_string()
    }
}

/// Key for a `Key = value` assignment inside a component body.
fn assigned_key(ident: &str) -> String {
    if ident.starts_with('@') {
        ident.to_string()
    } else {
        format!("@{ident}")
    }
}

fn positional_key(map: &Group) -> String {
    format!("value_{}", map.len())
}

/// `Name(...)` → `{Name: inner}`.
fn constructor(name: &str, inner: Value) -> Value {
    let mut wrapper = Group::new();
    wrapper.insert(name.to_string(), inner);
    Value::Group(wrapper)
}

/// Classify a bare token as boolean, integer, decimal or plain string.
pub fn classify_scalar(token: &str) -> Value {
    match token {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }
    if let Ok(n) = token.parse::<i64>() {
        return Value::Integer(n);
    }
    if is_decimal(token)
        && let Ok(f) = token.parse::<f64>()
    {
        return Value::Float(f);
    }
    Value::String(token.to_string())
}

/// `-?digits.digits`, nothing else.
fn is_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    match unsigned.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
