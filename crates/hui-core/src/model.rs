//! Core document model for HUI markup files.
//!
//! A document is a tree of typed components with named properties, plus a
//! table of global styles and the raw `$` declarations seen at the top level.
//! Everything here is produced once by the parser and treated as immutable
//! afterwards; consumers walk it read-only.

use crate::color::{self, Rgba};
use crate::scanner::is_ident_char;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value contents of a `( ... )` literal.
///
/// Keys are either declared names (`Key: value`, `@Key = value`) or
/// synthesized positional keys `value_<n>` for bare entries.
pub type Group = BTreeMap<String, Value>;

// ─── Values ──────────────────────────────────────────────────────────────

/// A parsed property or style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Quoted text, a bare word, or an `@name` reference that did not resolve.
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Color(Color),
    BoxMetrics(BoxMetrics),
    Group(Group),
    /// Reserved: the grammar never produces lists today.
    List(Vec<Value>),
}

impl Value {
    /// Look up `key` inside a group, trying the bare spelling before `@key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Group(map) => probe(map, key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The referenced style name if this is a still-unresolved `@name`.
    /// Text such as `"@user name"` is a plain string, not a reference.
    pub fn as_reference(&self) -> Option<&str> {
        let name = self.as_str()?.strip_prefix('@')?;
        (!name.is_empty() && name.chars().all(is_ident_char)).then_some(name)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of the value. Numeric-looking strings are accepted,
    /// fractional numbers are not.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Floating-point view of the value. Integers widen; numeric-looking
    /// strings are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Value::Group(map) => Some(map),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in hover text and lint messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Color(_) => "color",
            Value::BoxMetrics(_) => "box metrics",
            Value::Group(_) => "group",
            Value::List(_) => "list",
        }
    }

    /// Visit this value and every value nested inside it, depth-first.
    pub fn visit(&self, f: &mut impl FnMut(&Value)) {
        f(self);
        match self {
            Value::Group(map) => map.values().for_each(|v| v.visit(f)),
            Value::List(items) => items.iter().for_each(|v| v.visit(f)),
            _ => {}
        }
    }
}

/// Try `key`, then `@key`.
pub fn probe<'a>(map: &'a Group, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| map.get(&format!("@{key}")))
}

// ─── Color ───────────────────────────────────────────────────────────────

/// A `#hex` literal with an optional `(alpha)` suffix.
///
/// `hex` holds the digits without the leading `#`, exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub hex: String,
    pub alpha: f32,
}

impl Color {
    pub fn new(hex: impl Into<String>, alpha: f32) -> Self {
        Self {
            hex: hex.into(),
            alpha,
        }
    }

    /// Decode the hex digits and fold in the separate alpha channel.
    ///
    /// An 8-digit hex keeps its own alpha; the suffix then scales it.
    pub fn rgba(&self) -> Option<Rgba> {
        let mut rgba = color::parse_hex(&self.hex)?;
        let scaled = (f32::from(rgba.a) * self.alpha.clamp(0.0, 1.0)).round();
        rgba.a = scaled as u8;
        Some(rgba)
    }
}

// ─── Box metrics ─────────────────────────────────────────────────────────

/// The promoted "anchor" shape: size, flex weight and offsets.
///
/// Produced from any group carrying `Width`, `Height`, `Full` or
/// `FlexWeight`. A group with only `Full` is usually a padding/margin and
/// still lands here; see [`crate::query::Insets`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxMetrics {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub full: Option<i64>,
    pub flex_weight: Option<f64>,
    pub top: Option<i64>,
    pub bottom: Option<i64>,
    pub left: Option<i64>,
    pub right: Option<i64>,
}

// ─── Components ──────────────────────────────────────────────────────────

/// A node in the component tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Type name with `$Ns.@` / `@` prefixes stripped. Never empty.
    pub type_name: String,
    /// Set only when `#id` follows the type.
    pub id: Option<String>,
    /// `Key: v` stores under `Key`, `Key = v` under `@Key`. Both spellings
    /// may be present; use [`Component::property`] to probe.
    pub properties: BTreeMap<String, Value>,
    /// Child components in source order.
    pub children: Vec<Component>,
    /// Byte offset of the first character of the type name.
    pub start_offset: usize,
    /// Byte offset just past the closing `}`, or past the header when the
    /// component has no body.
    pub end_offset: usize,
}

impl Component {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: None,
            properties: BTreeMap::new(),
            children: Vec::new(),
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Property under `name`, falling back to the `@name` spelling.
    pub fn property(&self, name: &str) -> Option<&Value> {
        probe(&self.properties, name)
    }

    /// Whether `offset` falls inside this component's source span.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start_offset <= offset && offset < self.end_offset
    }

    /// Pre-order depth-first walk. The callback receives each component and
    /// its depth (0 for `self`).
    pub fn walk(&self, f: &mut impl FnMut(&Component, usize)) {
        self.walk_at(0, f);
    }

    fn walk_at(&self, depth: usize, f: &mut impl FnMut(&Component, usize)) {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }

    /// Number of components in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Component::count).sum::<usize>()
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The result of parsing one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Raw `$Name = ...` declarations, verbatim, without the trailing `;`.
    pub imports: Vec<String>,
    /// Global `@Name = value;` styles, keyed without the `@`.
    pub styles: BTreeMap<String, Value>,
    /// The first top-level component, if any.
    pub root: Option<Component>,
}

impl Document {
    pub fn style(&self, name: &str) -> Option<&Value> {
        self.styles.get(name.strip_prefix('@').unwrap_or(name))
    }
}
