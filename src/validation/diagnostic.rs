//! Diagnostics
//!
//! The single structured error a validation run stops on.

use std::fmt;

use serde::Serialize;

use crate::grammar::Expected;

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Leading whitespace does not match the structural position
    IndentationViolation,
    /// A recognized construct that is not valid in the current position
    UnexpectedConstruct,
    /// `- task:` / `- release:` keyword followed by a badly shaped value
    MalformedDeclaration,
    /// Input ended while a block was still open
    IncompleteStreamEnd,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::IndentationViolation => "indentation violation",
            Self::UnexpectedConstruct => "unexpected construct",
            Self::MalformedDeclaration => "malformed declaration",
            Self::IncompleteStreamEnd => "incomplete block at end of input",
        };
        f.write_str(text)
    }
}

/// A validation failure at a specific line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    /// Offending raw line, empty when input ended early
    pub text: String,
    pub kind: DiagnosticKind,
    pub expected: Expected,
}

impl Diagnostic {
    pub fn new(line: usize, text: impl Into<String>, kind: DiagnosticKind, expected: Expected) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
            expected,
        }
    }

    fn quoted_text(&self) -> String {
        match self.kind {
            DiagnosticKind::IncompleteStreamEnd => "<end of input>".to_string(),
            _ => format!("`{}`", self.text),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} ({}), expected {}",
            self.line,
            self.quoted_text(),
            self.kind,
            self.expected
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Render a diagnostic with the label of the input it came from
pub fn format_diagnostic(source: &str, diagnostic: &Diagnostic) -> String {
    format!(
        "ERROR of file structure at {}, line {}:\n{}\nExpected: {}",
        source,
        diagnostic.line,
        diagnostic.quoted_text(),
        diagnostic.expected
    )
}
