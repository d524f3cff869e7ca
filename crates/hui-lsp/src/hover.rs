//! Hover: show contextual information on hover.

use hui_core::catalog::is_component_type;
use hui_core::emitter::emit_value_string;
use hui_core::scanner::is_ident_char;
use hui_core::{Component, Document, parse_hex};
use tower_lsp::lsp_types::*;

/// Compute hover information at the given byte offset.
///
/// - Hovering an `@Name` → shows the resolved style value.
/// - Hovering a `#id` → shows the component summary.
/// - Hovering a `#hex` color → shows its channels.
/// - Hovering a type or property name → shows the component or value under
///   the caret.
pub fn compute_hover(text: &str, offset: usize, doc: &Document) -> Option<Hover> {
    let word = extract_word_at(text, offset);
    if word.is_empty() {
        return None;
    }

    if let Some(name) = word.strip_prefix('@')
        && let Some(value) = doc.style(name)
    {
        return Some(make_hover(&format!(
            "**@{name}** ({})\n\n```\n{}\n```",
            value.kind_name(),
            emit_value_string(value)
        )));
    }

    if let Some(rest) = word.strip_prefix('#') {
        if let Some(component) = doc.find_by_id(rest) {
            return Some(make_hover(&describe_component(component)));
        }
        if let Some(rgba) = parse_hex(rest) {
            return Some(make_hover(&format!(
                "**Color** `{}`\n\nr={} g={} b={} a={}",
                rgba.to_hex_with_alpha(),
                rgba.r,
                rgba.g,
                rgba.b,
                rgba.a
            )));
        }
        return None;
    }

    let component = doc.component_at(offset);
    if let Some(component) = component
        && let Some(value) = component.property(word.trim_start_matches('@'))
    {
        return Some(make_hover(&format!(
            "**{}** on `{}`\n\n```\n{}\n```",
            word.trim_start_matches('@'),
            component.type_name,
            emit_value_string(value)
        )));
    }
    if let Some(component) = component
        && component.type_name == word
    {
        return Some(make_hover(&describe_component(component)));
    }
    if is_component_type(word) {
        return Some(make_hover(&format!("**{word}**: built-in component")));
    }
    None
}

/// Extract the word around a byte offset. `#` only counts as the first
/// character so `#id` and `#hex` hover as a unit.
fn extract_word_at(text: &str, offset: usize) -> &str {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ident_char(c))
        .last()
        .map_or(offset, |(i, _)| i);
    let end = text[offset..]
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(text.len(), |(i, _)| offset + i);

    if start > 0 && text[..start].ends_with('#') {
        &text[start - 1..end]
    } else {
        &text[start..end]
    }
}

fn describe_component(component: &Component) -> String {
    let mut out = format!("**{}**", component.type_name);
    if let Some(id) = &component.id {
        out.push_str(&format!(" `#{id}`"));
    }
    out.push_str(&format!(
        "\n\n{} properties, {} children",
        component.properties.len(),
        component.children.len()
    ));
    let padding = component.padding();
    if padding != Default::default() {
        out.push_str(&format!(
            "\n\npadding: top {} bottom {} left {} right {}",
            padding.top, padding.bottom, padding.left, padding.right
        ));
    }
    out
}

fn make_hover(markdown: &str) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: markdown.to_string(),
        }),
        range: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hui_core::parse_document;

    fn hover_text(text: &str, offset: usize) -> Option<String> {
        let doc = parse_document(text);
        compute_hover(text, offset, &doc).map(|h| match h.contents {
            HoverContents::Markup(m) => m.value,
            _ => unreachable!(),
        })
    }

    #[test]
    fn extract_word_basic() {
        let text = "Label #Title { Text: @Name }";
        assert_eq!(extract_word_at(text, 2), "Label");
        assert_eq!(extract_word_at(text, 9), "#Title");
        assert_eq!(extract_word_at(text, 23), "@Name");
        assert_eq!(extract_word_at(text, 13), "");
    }

    #[test]
    fn hover_style_reference() {
        let text = "@Size = 12;\nLabel { FontSize: @Size; }";
        let md = hover_text(text, text.find("@Size;").unwrap() + 2).unwrap();
        assert!(md.contains("**@Size** (integer)"), "{md}");
        assert!(md.contains("12"));
    }

    #[test]
    fn hover_component_id() {
        let text = "Group #Root { Padding: (Full: 4); Label {} }";
        let md = hover_text(text, 8).unwrap();
        assert!(md.starts_with("**Group** `#Root`"), "{md}");
        assert!(md.contains("1 properties, 1 children"));
        assert!(md.contains("padding: top 4"));
    }

    #[test]
    fn hover_property_shows_value() {
        let text = "Label { Text: \"Hi\"; }";
        let md = hover_text(text, 9).unwrap();
        assert!(md.contains("**Text** on `Label`"), "{md}");
        assert!(md.contains("\"Hi\""));
    }

    #[test]
    fn hover_color_literal() {
        let text = "Label { Color: #ff8000; }";
        let md = hover_text(text, 17).unwrap();
        assert!(md.contains("#FF8000FF"), "{md}");
    }

    #[test]
    fn hover_whitespace_is_none() {
        assert!(hover_text("Group {   }", 8).is_none());
    }
}
