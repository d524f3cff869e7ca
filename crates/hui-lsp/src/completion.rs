//! Completions: context-aware HUI completions.

use hui_core::catalog::{COMMON_VALUES, COMPONENT_TYPES, PROPERTIES};
use hui_core::{Document, TokenKind, tokenize};
use tower_lsp::lsp_types::*;

/// Where the caret sits, as far as completion cares.
#[derive(Debug, PartialEq, Eq)]
enum Context {
    /// Typing an `@name` reference.
    StyleReference,
    /// Typing a `$Name` import reference.
    ImportReference,
    /// Right after `Key:` or `Key =`.
    Value,
    /// Inside a component body.
    Body,
    /// Outside every component.
    TopLevel,
}

/// Compute completions at the given byte offset.
///
/// Context comes from the token stream before the caret, so braces inside
/// strings and comments do not count toward nesting.
pub fn compute_completions(text: &str, offset: usize, doc: &Document) -> Vec<CompletionItem> {
    match detect_context(text, offset) {
        Context::StyleReference => style_completions(doc, false),
        Context::ImportReference => import_completions(doc),
        Context::Value => {
            let mut items = style_completions(doc, true);
            items.extend(COMMON_VALUES.iter().map(|v| CompletionItem {
                label: (*v).to_string(),
                kind: Some(CompletionItemKind::ENUM_MEMBER),
                ..Default::default()
            }));
            items
        }
        Context::Body => body_completions(),
        Context::TopLevel => top_level_completions(),
    }
}

fn detect_context(text: &str, offset: usize) -> Context {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];

    let word_start = before
        .rfind(|c: char| !hui_core::scanner::is_ident_char(c))
        .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
    let word = &before[word_start..];
    if word.starts_with('@') {
        return Context::StyleReference;
    }
    if word.starts_with('$') {
        return Context::ImportReference;
    }

    let mut depth: i32 = 0;
    let mut last_significant = None;
    for token in tokenize(before) {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth -= 1,
            _ => {}
        }
        if !matches!(token.kind, TokenKind::Whitespace | TokenKind::Comment) {
            last_significant = Some(token.kind);
        }
    }

    // A trailing partial word does not change what precedes it.
    let preceding = if word.is_empty() {
        last_significant
    } else {
        tokenize(&before[..word_start])
            .into_iter()
            .rev()
            .find(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Comment))
            .map(|t| t.kind)
    };
    if matches!(preceding, Some(TokenKind::Colon | TokenKind::Equals)) {
        return Context::Value;
    }

    if depth > 0 {
        Context::Body
    } else {
        Context::TopLevel
    }
}

/// Declared global styles. `with_sigil` controls whether the inserted text
/// carries the `@` (it is already typed in reference context).
fn style_completions(doc: &Document, with_sigil: bool) -> Vec<CompletionItem> {
    doc.styles
        .iter()
        .map(|(name, value)| CompletionItem {
            label: format!("@{name}"),
            kind: Some(CompletionItemKind::VARIABLE),
            detail: Some(value.kind_name().to_string()),
            insert_text: Some(if with_sigil {
                format!("@{name}")
            } else {
                name.clone()
            }),
            filter_text: Some(format!("@{name}")),
            ..Default::default()
        })
        .collect()
}

fn import_completions(doc: &Document) -> Vec<CompletionItem> {
    doc.imports
        .iter()
        .filter_map(|decl| {
            let name = decl.split('=').next()?.trim().strip_prefix('$')?;
            (!name.is_empty()).then(|| CompletionItem {
                label: format!("${name}"),
                kind: Some(CompletionItemKind::MODULE),
                detail: Some(decl.clone()),
                insert_text: Some(format!("{name}.@")),
                ..Default::default()
            })
        })
        .collect()
}

/// Completions at the top level of a HUI document.
fn top_level_completions() -> Vec<CompletionItem> {
    let keywords = [
        (
            "$import",
            "Import another .ui file",
            "\\$${1:Common} = \"${2:../Common.ui}\";",
        ),
        (
            "@style",
            "Global style declaration",
            "@${1:Name} = (${2:Key}: ${3:value});",
        ),
    ];

    let mut items: Vec<CompletionItem> = keywords
        .into_iter()
        .map(|(label, detail, snippet)| CompletionItem {
            label: label.to_string(),
            kind: Some(CompletionItemKind::KEYWORD),
            detail: Some(detail.to_string()),
            insert_text: Some(snippet.to_string()),
            insert_text_format: Some(InsertTextFormat::SNIPPET),
            ..Default::default()
        })
        .collect();
    items.extend(component_snippets());
    items
}

/// Completions inside a component body `{ ... }`.
fn body_completions() -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = PROPERTIES
        .iter()
        .map(|prop| CompletionItem {
            label: format!("{prop}:"),
            kind: Some(CompletionItemKind::PROPERTY),
            insert_text: Some(format!("{prop}: ")),
            filter_text: Some((*prop).to_string()),
            ..Default::default()
        })
        .collect();
    items.extend(component_snippets());
    items
}

fn component_snippets() -> impl Iterator<Item = CompletionItem> {
    COMPONENT_TYPES.iter().map(|ty| CompletionItem {
        label: (*ty).to_string(),
        kind: Some(CompletionItemKind::CLASS),
        detail: Some("Component".to_string()),
        insert_text: Some(format!("{ty} #${{1:Id}} {{\n  $0\n}}")),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hui_core::parse_document;

    fn labels(text: &str, offset: usize) -> Vec<String> {
        let doc = parse_document(text);
        compute_completions(text, offset, &doc)
            .into_iter()
            .map(|c| c.label)
            .collect()
    }

    #[test]
    fn top_level_offers_declarations_and_components() {
        let labels = labels("", 0);
        assert!(labels.contains(&"@style".to_string()));
        assert!(labels.contains(&"Group".to_string()));
        assert!(!labels.contains(&"Text:".to_string()));
    }

    #[test]
    fn body_offers_properties() {
        let text = "Group {\n  \n}";
        let labels = labels(text, 10);
        assert!(labels.contains(&"Anchor:".to_string()));
        assert!(labels.contains(&"Label".to_string()));
    }

    #[test]
    fn brace_inside_string_does_not_nest() {
        let text = "@A = \"{\";\n";
        assert_eq!(detect_context(text, text.len()), Context::TopLevel);
    }

    #[test]
    fn after_colon_offers_values_and_styles() {
        let text = "@Accent = #ff0000;\nLabel { Color: ";
        let labels = labels(text, text.len());
        assert!(labels.contains(&"@Accent".to_string()));
        assert!(labels.contains(&"Center".to_string()));
    }

    #[test]
    fn partial_value_word_still_counts_as_value() {
        let text = "Label { Visible = tr";
        assert_eq!(detect_context(text, text.len()), Context::Value);
    }

    #[test]
    fn at_sign_offers_styles_only() {
        let text = "@Accent = #ff0000;\nLabel { Color: @Ac";
        let doc = parse_document(text);
        let items = compute_completions(text, text.len(), &doc);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].insert_text.as_deref(), Some("Accent"));
    }

    #[test]
    fn dollar_offers_imports() {
        let text = "$C = \"../Common.ui\";\n$";
        let labels = labels(text, text.len());
        assert_eq!(labels, vec!["$C".to_string()]);
    }
}
