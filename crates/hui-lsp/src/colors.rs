//! Color provider: inline swatches and picker edits for `#hex(alpha)` literals.

use crate::position::range_of;
use hui_core::parser::parse_value;
use hui_core::{Rgba, Token, TokenKind, Value, tokenize};
use ropey::Rope;
use tower_lsp::lsp_types::{Color, ColorInformation, ColorPresentation, Range, TextEdit};

/// Every color literal in value position, with its decoded color.
///
/// A `#word` directly after a component type is an id, not a color, so only
/// hash tokens following `:`, `=`, `(` or `,` are considered. An immediately
/// following `(alpha)` is included in the range.
pub fn document_colors(text: &str, rope: &Rope) -> Vec<ColorInformation> {
    let tokens: Vec<Token> = tokenize(text)
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Whitespace | TokenKind::Comment))
        .collect();

    let mut colors = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Hash {
            continue;
        }
        let in_value_position = i > 0
            && matches!(
                tokens[i - 1].kind,
                TokenKind::Colon | TokenKind::Equals | TokenKind::LParen | TokenKind::Comma
            );
        if !in_value_position {
            continue;
        }

        let end = match &tokens[i + 1..] {
            [open, number, close, ..]
                if open.kind == TokenKind::LParen
                    && open.start == token.end
                    && number.kind == TokenKind::Number
                    && close.kind == TokenKind::RParen =>
            {
                close.end
            }
            _ => token.end,
        };

        let Value::Color(color) = parse_value(&text[token.start..end]) else {
            continue;
        };
        let Some(rgba) = color.rgba() else {
            continue;
        };
        let [red, green, blue, alpha] = rgba.to_unit();
        colors.push(ColorInformation {
            range: range_of(rope, token.start, end),
            color: Color {
                red,
                green,
                blue,
                alpha,
            },
        });
    }
    colors
}

/// Text the picker writes back: `#RRGGBB`, with an `(alpha)` suffix when not
/// opaque, plus the `#RRGGBBAA` form as an alternative.
pub fn color_presentations(color: Color, range: Range) -> Vec<ColorPresentation> {
    let rgba = Rgba::from_unit(color.red, color.green, color.blue, color.alpha);
    let primary = if rgba.a == 255 {
        rgba.to_hex()
    } else {
        format!("{}({})", rgba.to_hex(), format_alpha(color.alpha))
    };

    let mut labels = vec![primary];
    if rgba.a != 255 {
        labels.push(rgba.to_hex_with_alpha());
    }
    labels
        .into_iter()
        .map(|label| ColorPresentation {
            text_edit: Some(TextEdit {
                range,
                new_text: label.clone(),
            }),
            label,
            additional_text_edits: None,
        })
        .collect()
}

/// Alpha with at most two decimals and no trailing zeros.
fn format_alpha(alpha: f32) -> String {
    let s = format!("{:.2}", alpha.clamp(0.0, 1.0));
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
