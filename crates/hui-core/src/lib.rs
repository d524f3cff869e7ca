pub mod catalog;
pub mod color;
pub mod emitter;
pub mod lexer;
pub mod lint;
pub mod model;
pub mod parser;
pub mod promote;
pub mod query;
pub mod resolve;
pub mod scanner;

pub use color::{Rgba, parse_hex};
pub use emitter::emit_document;
pub use lexer::{Token, TokenKind, tokenize};
pub use lint::{LintConfig, LintDiagnostic, LintSeverity, lint_document};
pub use model::*;
pub use parser::{
    DiagnosticKind, ParseDiagnostic, ParseOptions, ParseOutput, parse_document, parse_with,
};
pub use query::Insets;
