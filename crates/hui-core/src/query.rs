//! Read-only queries over a parsed [`Document`]: caret → component mapping
//! and padding/margin extraction.

use crate::model::{Component, Document, Value};
use serde::{Deserialize, Serialize};

// ─── Caret mapping ───────────────────────────────────────────────────────

impl Document {
    /// Innermost component whose source span contains `offset`.
    pub fn component_at(&self, offset: usize) -> Option<&Component> {
        self.path_at(offset).pop()
    }

    /// Chain of components from the root down to the innermost one whose
    /// span contains `offset`. Empty when the offset is outside the root.
    pub fn path_at(&self, offset: usize) -> Vec<&Component> {
        let mut path = Vec::new();
        let mut current = match &self.root {
            Some(root) if root.contains_offset(offset) => root,
            _ => return path,
        };
        loop {
            path.push(current);
            match current.children.iter().find(|c| c.contains_offset(offset)) {
                Some(child) => current = child,
                None => return path,
            }
        }
    }

    /// Find the first component (pre-order) with the given `#id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Component> {
        fn search<'a>(c: &'a Component, id: &str) -> Option<&'a Component> {
            if c.id.as_deref() == Some(id) {
                return Some(c);
            }
            c.children.iter().find_map(|child| search(child, id))
        }
        self.root.as_ref().and_then(|root| search(root, id))
    }
}

// ─── Insets ──────────────────────────────────────────────────────────────

/// Per-side padding or margin in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub top: i64,
    pub bottom: i64,
    pub left: i64,
    pub right: i64,
}

impl Insets {
    pub const fn uniform(v: i64) -> Self {
        Self {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }

    /// Interpret a padding/margin value.
    ///
    /// A generic group uses `Full` as the default for every side and lets
    /// `Top`/`Bottom`/`Left`/`Right` override it. A promoted box-metrics
    /// value only contributes `Full`: groups carrying `Full` are promoted
    /// whatever else they hold, and callers rely on that reading. Anything
    /// else is zero.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Group(_) => {
                let side = |key: &str, fallback: i64| {
                    value.get(key).and_then(Value::as_i64).unwrap_or(fallback)
                };
                let full = side("Full", 0);
                Self {
                    top: side("Top", full),
                    bottom: side("Bottom", full),
                    left: side("Left", full),
                    right: side("Right", full),
                }
            }
            Value::BoxMetrics(m) => Self::uniform(m.full.unwrap_or(0)),
            _ => Self::default(),
        }
    }
}

impl Component {
    /// `Padding` (either spelling) as insets.
    pub fn padding(&self) -> Insets {
        self.property("Padding")
            .map(Insets::from_value)
            .unwrap_or_default()
    }

    /// `Margin` (either spelling) as insets.
    pub fn margin(&self) -> Insets {
        self.property("Margin")
            .map(Insets::from_value)
            .unwrap_or_default()
    }
}
