//! Validation Engine
//!
//! Stateful, fail-fast enforcement of the changelog grammar.

pub mod diagnostic;
pub mod engine;

pub use diagnostic::{format_diagnostic, Diagnostic, DiagnosticKind};
pub use engine::{
    validate_str, EngineOptions, Mode, ValidationEngine, ValidationState, ValidationSummary,
};
