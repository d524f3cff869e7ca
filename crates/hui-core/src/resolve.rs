//! `@name` style reference resolution.
//!
//! References resolve against the styles declared *before* the point of use.
//! A single forward pass is made; a replacement value is never resolved
//! again, so self-referential or forward references simply stay as strings.

use crate::model::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Accumulated style table plus the names that were successfully looked up.
#[derive(Debug, Default)]
pub struct StyleScope {
    styles: BTreeMap<String, Value>,
    used: BTreeSet<String>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a style. Last write wins.
    pub fn define(&mut self, name: &str, value: Value) {
        let name = name.strip_prefix('@').unwrap_or(name);
        if self.styles.insert(name.to_string(), value).is_some() {
            log::debug!("style `{name}` redefined");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.styles.get(name)
    }

    /// Resolve every `@name` string in `value`, recursing into groups and
    /// lists. Unknown names are kept verbatim.
    pub fn resolve(&mut self, value: Value) -> Value {
        match value {
            Value::String(s) => match s.strip_prefix('@').and_then(|n| self.styles.get(n)) {
                Some(found) => {
                    let found = found.clone();
                    self.used.insert(s[1..].to_string());
                    found
                }
                None => Value::String(s),
            },
            Value::Group(map) => Value::Group(
                map.into_iter()
                    .map(|(k, v)| (k, self.resolve(v)))
                    .collect(),
            ),
            Value::List(items) => {
                Value::List(items.into_iter().map(|v| self.resolve(v)).collect())
            }
            other => other,
        }
    }

    /// Consume the scope, returning the style table and the referenced names.
    pub fn finish(self) -> (BTreeMap<String, Value>, BTreeSet<String>) {
        (self.styles, self.used)
    }
}

/// Resolve `value` against a fixed style table.
pub fn resolve_value(value: Value, styles: &BTreeMap<String, Value>) -> Value {
    let mut scope = StyleScope {
        styles: styles.clone(),
        used: BTreeSet::new(),
    };
    scope.resolve(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Group};

    fn scope_with(name: &str, value: Value) -> StyleScope {
        let mut scope = StyleScope::new();
        scope.define(name, value);
        scope
    }

    #[test]
    fn replaces_known_reference() {
        let color = Value::Color(Color::new("fff", 1.0));
        let mut scope = scope_with("Accent", color.clone());
        assert_eq!(scope.resolve(Value::String("@Accent".into())), color);
        let (_, used) = scope.finish();
        assert!(used.contains("Accent"));
    }

    #[test]
    fn keeps_unknown_reference() {
        let mut scope = StyleScope::new();
        let v = Value::String("@Missing".into());
        assert_eq!(scope.resolve(v.clone()), v);
    }

    #[test]
    fn recurses_into_groups() {
        let mut scope = scope_with("Size", Value::Integer(24));
        let mut inner = Group::new();
        inner.insert("FontSize".into(), Value::String("@Size".into()));
        let mut outer = Group::new();
        outer.insert("LabelStyle".into(), Value::Group(inner));

        let resolved = scope.resolve(Value::Group(outer));
        assert_eq!(
            resolved.get("LabelStyle").and_then(|g| g.get("FontSize")),
            Some(&Value::Integer(24))
        );
    }

    #[test]
    fn replacement_is_not_resolved_again() {
        let mut scope = scope_with("A", Value::String("@A".into()));
        assert_eq!(
            scope.resolve(Value::String("@A".into())),
            Value::String("@A".into())
        );
    }

    #[test]
    fn resolved_value_is_fixed_point() {
        let styles = BTreeMap::from([("X".to_string(), Value::Integer(1))]);
        let mut g = Group::new();
        g.insert("a".into(), Value::Boolean(true));
        g.insert("b".into(), Value::String("plain".into()));
        let v = Value::Group(g);
        assert_eq!(resolve_value(v.clone(), &styles), v);
    }

    #[test]
    fn define_strips_prefix() {
        let scope = scope_with("@Btn", Value::Integer(1));
        assert_eq!(scope.get("Btn"), Some(&Value::Integer(1)));
    }
}
