//! Emitter: `Document` → canonical HUI text.
//!
//! Output order is declarations, styles (by name), then the root component.
//! Re-parsing the output yields the same tree, offsets aside, as long as no
//! style refers to one declared after it.

use crate::model::*;
use std::fmt::Write;

/// Emit a document as canonical text.
#[must_use]
pub fn emit_document(doc: &Document) -> String {
    let mut out = String::with_capacity(256);

    for decl in &doc.imports {
        let _ = writeln!(out, "{decl};");
    }
    if !doc.imports.is_empty() {
        out.push('\n');
    }

    for (name, value) in &doc.styles {
        let _ = write!(out, "@{name} = ");
        emit_value(&mut out, value);
        out.push_str(";\n");
    }
    if !doc.styles.is_empty() {
        out.push('\n');
    }

    if let Some(root) = &doc.root {
        emit_component(&mut out, root, 0);
    }

    out
}

/// Emit a single value expression.
#[must_use]
pub fn emit_value_string(value: &Value) -> String {
    let mut out = String::new();
    emit_value(&mut out, value);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn emit_component(out: &mut String, component: &Component, depth: usize) {
    indent(out, depth);
    out.push_str(&component.type_name);
    if let Some(id) = &component.id {
        let _ = write!(out, " #{id}");
    }

    if component.properties.is_empty() && component.children.is_empty() {
        out.push_str(" {}\n");
        return;
    }
    out.push_str(" {\n");

    for (key, value) in &component.properties {
        indent(out, depth + 1);
        match key.strip_prefix('@') {
            Some(name) => {
                let _ = write!(out, "{name} = ");
            }
            None => {
                let _ = write!(out, "{key}: ");
            }
        }
        emit_value(out, value);
        out.push_str(";\n");
    }

    for child in &component.children {
        emit_component(out, child, depth + 1);
    }

    indent(out, depth);
    out.push_str("}\n");
}

fn emit_value(out: &mut String, value: &Value) {
    match value {
        // Unresolved references stay bare so they read as references again.
        Value::String(s) if value.as_reference().is_some() => out.push_str(s),
        Value::String(s) => {
            let _ = write!(out, "\"{s}\"");
        }
        Value::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) => emit_float(out, *f),
        Value::Boolean(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Color(c) => {
            let _ = write!(out, "#{}", c.hex);
            if c.alpha != 1.0 {
                let _ = write!(out, "({})", c.alpha);
            }
        }
        Value::BoxMetrics(m) => emit_box_metrics(out, m),
        Value::Group(map) => {
            out.push('(');
            for (i, (key, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{key}: ");
                emit_value(out, v);
            }
            out.push(')');
        }
        Value::List(items) => {
            out.push('(');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                emit_value(out, v);
            }
            out.push(')');
        }
    }
}

/// Floats always carry a fractional part so they never re-read as integers.
fn emit_float(out: &mut String, f: f64) {
    if f.fract() == 0.0 {
        let _ = write!(out, "{f:.1}");
    } else {
        let _ = write!(out, "{f}");
    }
}

fn emit_box_metrics(out: &mut String, m: &BoxMetrics) {
    let ints = [
        ("Width", m.width),
        ("Height", m.height),
        ("Full", m.full),
        ("Top", m.top),
        ("Bottom", m.bottom),
        ("Left", m.left),
        ("Right", m.right),
    ];
    if *m == BoxMetrics::default() {
        // `()` would re-read as an empty group; an unparsable size key keeps
        // the promotion and still yields no fields.
        out.push_str("(Width: \"\")");
        return;
    }
    let mut first = true;
    out.push('(');
    for (key, v) in ints {
        if let Some(v) = v {
            if !first {
                out.push_str(", ");
            }
            first = false;
            let _ = write!(out, "{key}: {v}");
        }
    }
    if let Some(fw) = m.flex_weight {
        if !first {
            out.push_str(", ");
        }
        out.push_str("FlexWeight: ");
        emit_float(out, fw);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_document, parse_value};

    #[test]
    fn emit_simple_tree() {
        let doc = parse_document("Group #Root { Label { Text: \"Hi\"; Visible = false } }");
        assert_eq!(
            emit_document(&doc),
            "Group #Root {\n  Label {\n    Visible = false;\n    Text: \"Hi\";\n  }\n}\n"
        );
    }

    #[test]
    fn emit_values() {
        for src in [
            "#336699(0.5)",
            "(Full: 16)",
            "(FlexWeight: 1.0, Height: 30)",
            "(Background: #fff, Label: \"x\")",
            "2.5",
            "@Missing",
        ] {
            let v = parse_value(src);
            assert_eq!(parse_value(&emit_value_string(&v)), v, "value `{src}`");
        }
        assert_eq!(emit_value_string(&Value::Float(3.0)), "3.0");
    }

    #[test]
    fn emit_strings_quote_unless_reference() {
        assert_eq!(emit_value_string(&Value::String("@Missing".into())), "@Missing");
        assert_eq!(
            emit_value_string(&Value::String("@user name".into())),
            "\"@user name\""
        );
    }

    #[test]
    fn emit_empty_box_metrics_keeps_shape() {
        let v = parse_value("(Width: 12.5)");
        assert_eq!(v, Value::BoxMetrics(BoxMetrics::default()));
        assert_eq!(emit_value_string(&v), "(Width: \"\")");
        assert_eq!(parse_value(&emit_value_string(&v)), v);
    }

    #[test]
    fn emit_styles_and_imports() {
        let doc = parse_document("$C = \"../Common.ui\";\n@B = 2;\n@A = 1;");
        assert_eq!(
            emit_document(&doc),
            "$C = \"../Common.ui\";\n\n@A = 1;\n@B = 2;\n\n"
        );
    }
}
