//! Document symbols: outline for HUI documents.

use crate::position::range_of;
use hui_core::scanner::is_ident_char;
use hui_core::{Component, Document, TokenKind, tokenize};
use ropey::Rope;
use tower_lsp::lsp_types::*;

/// Compute a nested outline: global styles first, then the component tree.
#[allow(deprecated)] // DocumentSymbol::deprecated is deprecated but required
pub fn compute_symbols(text: &str, rope: &Rope, doc: &Document) -> Vec<DocumentSymbol> {
    let mut symbols: Vec<DocumentSymbol> = style_declarations(text)
        .into_iter()
        .filter(|(name, _, _)| doc.style(name).is_some())
        .map(|(name, start, end)| {
            let range = range_of(rope, start, end);
            DocumentSymbol {
                detail: doc.style(&name).map(|v| v.kind_name().to_string()),
                name,
                kind: SymbolKind::CONSTANT,
                tags: None,
                deprecated: None,
                range,
                selection_range: range,
                children: None,
            }
        })
        .collect();

    if let Some(root) = &doc.root {
        symbols.push(component_symbol(text, rope, root));
    }
    symbols
}

#[allow(deprecated)]
fn component_symbol(text: &str, rope: &Rope, component: &Component) -> DocumentSymbol {
    let name = match &component.id {
        Some(id) => format!("{} #{id}", component.type_name),
        None => component.type_name.clone(),
    };
    let children: Vec<DocumentSymbol> = component
        .children
        .iter()
        .map(|child| component_symbol(text, rope, child))
        .collect();

    DocumentSymbol {
        name,
        detail: (!component.properties.is_empty())
            .then(|| format!("{} properties", component.properties.len())),
        kind: if component.children.is_empty() {
            SymbolKind::OBJECT
        } else {
            SymbolKind::NAMESPACE
        },
        tags: None,
        deprecated: None,
        range: range_of(rope, component.start_offset, component.end_offset),
        selection_range: range_of(rope, component.start_offset, type_token_end(text, component)),
        children: (!children.is_empty()).then_some(children),
    }
}

/// End of the type token as written, including any `$Ns.@` prefix, kept
/// inside the component's own span.
fn type_token_end(text: &str, component: &Component) -> usize {
    let len: usize = text
        .get(component.start_offset..)
        .unwrap_or("")
        .chars()
        .take_while(|&c| is_ident_char(c))
        .map(char::len_utf8)
        .sum();
    (component.start_offset + len).min(component.end_offset)
}

/// Find `@Name =` declarations outside every brace, with the span from the
/// name to the terminating `;` (or end of input).
fn style_declarations(text: &str) -> Vec<(String, usize, usize)> {
    let tokens: Vec<_> = tokenize(text)
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Comment))
        .collect();

    let mut found = Vec::new();
    let mut depth = 0i32;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth -= 1,
            _ => {}
        }
        let word = token.text(text);
        if depth == 0
            && word.starts_with('@')
            && tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Equals)
        {
            let end = tokens[i + 1..]
                .iter()
                .find(|t| t.kind == TokenKind::Semicolon)
                .map_or(text.len(), |t| t.end);
            found.push((word[1..].to_string(), token.start, end));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use hui_core::parse_document;

    const SAMPLE: &str = "@Accent = #ff0000;\n\
                          Group #Root {\n\
                          \x20 Label #Title { Text: \"Hi\"; }\n\
                          \x20 Group { Button {} }\n\
                          }";

    fn symbols(text: &str) -> Vec<DocumentSymbol> {
        compute_symbols(text, &Rope::from_str(text), &parse_document(text))
    }

    #[test]
    fn styles_come_before_components() {
        let syms = symbols(SAMPLE);
        assert_eq!(syms.len(), 2);
        assert_eq!(syms[0].name, "Accent");
        assert_eq!(syms[0].kind, SymbolKind::CONSTANT);
        assert_eq!(syms[0].range.end, Position::new(0, 18));
        assert_eq!(syms[1].name, "Group #Root");
    }

    #[test]
    fn component_tree_is_nested() {
        let syms = symbols(SAMPLE);
        let root = &syms[1];
        let children = root.children.as_ref().unwrap();
        let names: Vec<_> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Label #Title", "Group"]);
        assert_eq!(children[0].range.start, Position::new(2, 2));
        assert_eq!(children[0].detail.as_deref(), Some("1 properties"));
        let inner = children[1].children.as_ref().unwrap();
        assert_eq!(inner[0].name, "Button");
        assert_eq!(inner[0].kind, SymbolKind::OBJECT);
    }

    #[test]
    fn selection_covers_prefixed_type_token() {
        let text = "$C = \"../Common.ui\";\n$C.@CheckBoxWithLabel #Opt {}";
        let syms = symbols(text);
        let root = &syms[0];
        assert_eq!(root.name, "CheckBoxWithLabel #Opt");
        assert_eq!(root.selection_range.start, Position::new(1, 0));
        assert_eq!(root.selection_range.end, Position::new(1, 21));
    }

    #[test]
    fn at_property_inside_body_is_not_a_style() {
        let text = "Label { @Text = \"x\"; }";
        assert!(style_declarations(text).is_empty());
    }

    #[test]
    fn empty_document_has_no_symbols() {
        assert!(symbols("").is_empty());
    }
}
