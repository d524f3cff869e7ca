//! Diagnostics: parser recovery events and lint findings → LSP diagnostics.

use crate::position::range_of;
use hui_core::scanner::is_ident_char;
use hui_core::{DiagnosticKind, LintConfig, LintSeverity, ParseOutput, lint_document};
use ropey::Rope;
use tower_lsp::lsp_types::*;

const SOURCE: &str = "hui-lsp";

/// Compute the full diagnostic set for a parsed document.
///
/// Recovery events become errors (or warnings for budget/depth cut-offs);
/// lint findings keep their own severity and carry the rule id as `code`.
pub fn compute_diagnostics(text: &str, rope: &Rope, output: &ParseOutput) -> Vec<Diagnostic> {
    let mut diags: Vec<Diagnostic> = output
        .diagnostics
        .iter()
        .map(|d| Diagnostic {
            range: range_of(rope, d.offset, char_end(text, d.offset)),
            severity: Some(parse_severity(d.kind)),
            source: Some(SOURCE.to_string()),
            message: d.message.clone(),
            ..Default::default()
        })
        .collect();

    for lint in lint_document(output, &LintConfig::default()) {
        diags.push(Diagnostic {
            range: range_of(rope, lint.offset, word_end(text, lint.offset)),
            severity: Some(match lint.severity {
                LintSeverity::Warning => DiagnosticSeverity::WARNING,
                LintSeverity::Info => DiagnosticSeverity::INFORMATION,
            }),
            code: Some(NumberOrString::String(lint.rule.to_string())),
            source: Some(SOURCE.to_string()),
            message: lint.message,
            ..Default::default()
        });
    }

    diags
}

fn parse_severity(kind: DiagnosticKind) -> DiagnosticSeverity {
    match kind {
        DiagnosticKind::BudgetExhausted | DiagnosticKind::TooDeep => DiagnosticSeverity::WARNING,
        _ => DiagnosticSeverity::ERROR,
    }
}

/// End of the character starting at `offset`.
fn char_end(text: &str, offset: usize) -> usize {
    text.get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(offset, |c| offset + c.len_utf8())
}

/// End of the identifier starting at `offset`, so lint findings underline
/// the component type name rather than the whole body.
fn word_end(text: &str, offset: usize) -> usize {
    let Some(rest) = text.get(offset..) else {
        return offset;
    };
    let len: usize = rest
        .chars()
        .take_while(|&c| is_ident_char(c))
        .map(char::len_utf8)
        .sum();
    if len == 0 { char_end(text, offset) } else { offset + len }
}
