//! Lint diagnostics for HUI documents.
//!
//! Reports likely mistakes without modifying the document. Results feed into
//! `textDocument/publishDiagnostics` in the language server.

use crate::color::parse_hex;
use crate::model::{Component, Value};
use crate::parser::ParseOutput;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Likely a mistake.
    Warning,
    /// Style suggestion.
    Info,
}

/// A single lint finding.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Byte offset the finding is anchored to.
    pub offset: usize,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "unused-style", "invalid-color").
    pub rule: &'static str,
}

// ─── Config ──────────────────────────────────────────────────────────────

/// Which rules [`lint_document`] runs. All on by default.
#[derive(Debug, Clone)]
pub struct LintConfig {
    pub unresolved_reference: bool,
    pub unused_style: bool,
    pub duplicate_spelling: bool,
    pub invalid_color: bool,
    pub extra_root: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            unresolved_reference: true,
            unused_style: true,
            duplicate_spelling: true,
            invalid_color: true,
            extra_root: true,
        }
    }
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run the configured lint rules over a parse result.
#[must_use]
pub fn lint_document(output: &ParseOutput, config: &LintConfig) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    if let Some(root) = &output.document.root {
        root.walk(&mut |component, _| {
            if config.unresolved_reference {
                lint_unresolved(component, &mut diags);
            }
            if config.duplicate_spelling {
                lint_duplicate_spelling(component, &mut diags);
            }
            if config.invalid_color {
                lint_invalid_colors(component, &mut diags);
            }
        });
    }
    if config.unused_style {
        lint_unused_styles(output, &mut diags);
    }
    if config.extra_root {
        lint_extra_roots(output, &mut diags);
    }
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

/// Warn on `@name` strings that survived resolution.
fn lint_unresolved(component: &Component, diags: &mut Vec<LintDiagnostic>) {
    for (key, value) in &component.properties {
        value.visit(&mut |v| {
            if let Some(name) = v.as_reference() {
                diags.push(LintDiagnostic {
                    offset: component.start_offset,
                    message: format!(
                        "`{key}` on `{}` references `@{name}`, which is not declared before this point.",
                        component.type_name
                    ),
                    severity: LintSeverity::Warning,
                    rule: "unresolved-reference",
                });
            }
        });
    }
}

/// Info when a property is set as both `Key:` and `Key =`.
fn lint_duplicate_spelling(component: &Component, diags: &mut Vec<LintDiagnostic>) {
    for key in component.properties.keys() {
        if key.starts_with('@') {
            continue;
        }
        if component.properties.contains_key(&format!("@{key}")) {
            diags.push(LintDiagnostic {
                offset: component.start_offset,
                message: format!(
                    "`{key}` is set both with `:` and `=` on `{}`; readers pick `{key}:` first.",
                    component.type_name
                ),
                severity: LintSeverity::Info,
                rule: "duplicate-spelling",
            });
        }
    }
}

/// Warn on color literals that do not decode.
fn lint_invalid_colors(component: &Component, diags: &mut Vec<LintDiagnostic>) {
    for value in component.properties.values() {
        value.visit(&mut |v| {
            if let Value::Color(color) = v
                && parse_hex(&color.hex).is_none()
            {
                diags.push(LintDiagnostic {
                    offset: component.start_offset,
                    message: format!(
                        "`#{}` is not a valid color; use #RGB, #RRGGBB or #RRGGBBAA.",
                        color.hex
                    ),
                    severity: LintSeverity::Warning,
                    rule: "invalid-color",
                });
            }
        });
    }
}

/// Info when a global style is declared but never referenced.
fn lint_unused_styles(output: &ParseOutput, diags: &mut Vec<LintDiagnostic>) {
    for name in output.document.styles.keys() {
        if !output.used_styles.contains(name) {
            diags.push(LintDiagnostic {
                offset: 0,
                message: format!("Style `@{name}` is declared but never used."),
                severity: LintSeverity::Info,
                rule: "unused-style",
            });
        }
    }
}

/// Warn on top-level components after the first; they are dropped.
fn lint_extra_roots(output: &ParseOutput, diags: &mut Vec<LintDiagnostic>) {
    for &(start, _) in &output.discarded {
        diags.push(LintDiagnostic {
            offset: start,
            message: "Only the first top-level component is kept; this one is ignored.".into(),
            severity: LintSeverity::Warning,
            rule: "extra-root",
        });
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, parse_with};

    fn lint(input: &str) -> Vec<LintDiagnostic> {
        let output = parse_with(input, &ParseOptions::default());
        lint_document(&output, &LintConfig::default())
    }

    fn has_rule(diags: &[LintDiagnostic], rule: &str) -> bool {
        diags.iter().any(|d| d.rule == rule)
    }

    #[test]
    fn lint_unresolved_reference() {
        let diags = lint("Label { Style: (Inner: @Later) }\n@Later = 1;");
        assert!(has_rule(&diags, "unresolved-reference"));
    }

    #[test]
    fn lint_ignores_quoted_text_with_at_sign() {
        let diags = lint("Label { Text: \"@everyone look\"; }");
        assert!(!has_rule(&diags, "unresolved-reference"));
    }

    #[test]
    fn lint_unused_style() {
        let diags = lint("@Ghost = (Opacity: 0.5);\nGroup {}");
        assert!(has_rule(&diags, "unused-style"));
    }

    #[test]
    fn lint_duplicate_spelling() {
        let diags = lint("CheckBox { Checked: true; Checked = false; }");
        assert!(has_rule(&diags, "duplicate-spelling"));
    }

    #[test]
    fn lint_invalid_color() {
        let diags = lint("Label { Color: #12345 }");
        assert!(has_rule(&diags, "invalid-color"));
    }

    #[test]
    fn lint_extra_root() {
        let diags = lint("Group {}\nGroup {}");
        let extra: Vec<_> = diags.iter().filter(|d| d.rule == "extra-root").collect();
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].offset, 9);
    }

    #[test]
    fn lint_clean_document_no_diags() {
        let input = r#"
@Accent = #6C5CE7;
Group #Root {
  Background: @Accent;
  Label { Text: "Hello"; }
}
"#;
        let diags = lint(input);
        assert!(diags.is_empty(), "clean document should have no diagnostics: {diags:?}");
    }

    #[test]
    fn rules_can_be_disabled() {
        let output = parse_with("@Ghost = 1;\nGroup {}", &ParseOptions::default());
        let config = LintConfig {
            unused_style: false,
            ..LintConfig::default()
        };
        assert!(lint_document(&output, &config).is_empty());
    }
}
