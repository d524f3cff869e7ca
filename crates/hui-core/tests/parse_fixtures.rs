//! Integration tests: parse realistic `.ui` files end to end.

use hui_core::*;
use pretty_assertions::assert_eq;

const SETTINGS: &str = include_str!("fixtures/settings_page.ui");
const MALFORMED: &str = include_str!("fixtures/malformed.ui");

// ─── Helpers ─────────────────────────────────────────────────────────────

fn find<'a>(doc: &'a Document, id: &str) -> &'a Component {
    doc.find_by_id(id)
        .unwrap_or_else(|| panic!("component #{id} not found"))
}

// ─── Well-formed fixture ─────────────────────────────────────────────────

#[test]
fn settings_page_structure() {
    let out = parse_with(SETTINGS, &ParseOptions::default());
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);

    let doc = &out.document;
    assert_eq!(
        doc.imports,
        vec![
            "$C = \"../Common.ui\"".to_string(),
            "$Sounds = \"../Sounds.ui\"".to_string()
        ]
    );
    assert_eq!(doc.styles.len(), 5);

    let root = doc.root.as_ref().unwrap();
    assert_eq!(root.type_name, "Group");
    assert_eq!(root.id.as_deref(), Some("Settings"));
    let child_types: Vec<_> = root.children.iter().map(|c| c.type_name.as_str()).collect();
    assert_eq!(child_types, vec!["Label", "Group", "TextButton"]);
}

#[test]
fn settings_page_values() {
    let doc = parse_document(SETTINGS);
    let root = doc.root.as_ref().unwrap();

    assert_eq!(
        root.property("Anchor"),
        Some(&Value::BoxMetrics(BoxMetrics {
            width: Some(640),
            height: Some(480),
            ..BoxMetrics::default()
        }))
    );
    assert_eq!(
        root.property("Background"),
        Some(&Value::Color(Color::new("101820", 0.85)))
    );
    assert_eq!(root.padding(), Insets::uniform(16));

    let rows = find(&doc, "Rows");
    assert_eq!(
        rows.margin(),
        Insets {
            top: 8,
            bottom: 0,
            left: 4,
            right: 4
        }
    );

    let fullscreen = find(&doc, "Fullscreen");
    assert_eq!(fullscreen.type_name, "CheckBoxWithLabel");
    assert_eq!(fullscreen.property("Checked"), Some(&Value::Boolean(true)));
    assert!(fullscreen.properties.contains_key("@Text"));
    assert_eq!(fullscreen.property("Anchor"), doc.style("RowAnchor"));

    let volume = find(&doc, "Volume");
    assert_eq!(volume.property("Value").and_then(Value::as_i64), Some(75));
}

#[test]
fn settings_page_resolves_nested_styles() {
    let doc = parse_document(SETTINGS);

    let title = find(&doc, "Title");
    let style = title.property("Style").unwrap().get("LabelStyle").unwrap();
    assert_eq!(style.get("FontSize"), Some(&Value::Integer(24)));
    assert_eq!(
        style.get("TextColor"),
        Some(&Value::Color(Color::new("3a7bd5", 1.0)))
    );

    let apply = find(&doc, "Apply");
    let background = apply
        .property("Style")
        .and_then(|s| s.get("TextButtonStyle"))
        .and_then(|s| s.get("Default"))
        .and_then(|s| s.get("Background"));
    assert_eq!(background, doc.style("Accent"));
}

#[test]
fn settings_page_is_lint_clean() {
    let out = parse_with(SETTINGS, &ParseOptions::default());
    let diags = lint_document(&out, &LintConfig::default());
    assert!(diags.is_empty(), "{diags:?}");
}

#[test]
fn settings_page_child_order_and_offsets() {
    let doc = parse_document(SETTINGS);
    let root = doc.root.as_ref().unwrap();

    assert_eq!(root.end_offset, SETTINGS.trim_end().len());
    let mut last_start = 0;
    root.walk(&mut |c, _| {
        assert!(c.start_offset >= last_start, "pre-order offsets must not decrease");
        assert!(c.end_offset > c.start_offset);
        assert!(SETTINGS[c.start_offset..].starts_with(|ch: char| !ch.is_whitespace()));
        last_start = c.start_offset;
    });
}

#[test]
fn reparse_is_deterministic() {
    assert_eq!(
        parse_with(SETTINGS, &ParseOptions::default()),
        parse_with(SETTINGS, &ParseOptions::default())
    );
}

// ─── Malformed fixture ───────────────────────────────────────────────────

#[test]
fn malformed_file_recovers() {
    let out = parse_with(MALFORMED, &ParseOptions::default());

    assert!(out.has(DiagnosticKind::SkippedChar));
    assert!(out.has(DiagnosticKind::UnterminatedGroup));
    assert!(out.has(DiagnosticKind::UnterminatedBody));

    let broken = out.document.style("Broken").unwrap();
    assert_eq!(
        broken,
        &Value::BoxMetrics(BoxMetrics {
            width: Some(10),
            ..BoxMetrics::default()
        })
    );

    let root = out.document.root.as_ref().unwrap();
    assert_eq!(root.id.as_deref(), Some("Root"));
    let texts: Vec<_> = root
        .children
        .iter()
        .filter(|c| c.type_name == "Label")
        .filter_map(|c| c.property("Text").and_then(Value::as_str))
        .collect();
    assert_eq!(texts, vec!["ok", "still here"]);
    assert!(matches!(
        root.property("Anchor"),
        Some(Value::BoxMetrics(BoxMetrics { width: Some(20), .. }))
    ));
}

#[test]
fn document_serializes_to_json() {
    let doc = parse_document("Group #A { Padding: (Full: 4) }");
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
