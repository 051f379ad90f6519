//! Changelog Validator
//!
//! A fail-fast checker for the structured changelog format used by release
//! tooling: task and release/prerelease blocks grouped under major version
//! markers.
//!
//! This library provides:
//! - Line classification against a fixed table of line shapes
//! - Task and release block grammars as explicit state machines
//! - A single-pass validation engine with precise diagnostics
//! - A line-source driver and the `changelog-check` command-line front end

pub mod cli;
pub mod config;
pub mod driver;
pub mod grammar;
pub mod parser;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use driver::{Driver, LineSource, Outcome, ReaderSource, TextSource};
pub use parser::{classify_line, Classification, Line};
pub use validation::{
    format_diagnostic, validate_str, Diagnostic, DiagnosticKind, EngineOptions, ValidationEngine,
    ValidationSummary,
};
