//! Changelog Line Classifier
//!
//! Maps one raw line to the shape it was recognized as. Pure and stateless:
//! indentation plus a literal keyword prefix decide the classification, the
//! grammar decides whether that shape is allowed where it appears.

pub mod classification;
pub mod rules;

pub use classification::{
    Architecture, Classification, EntryType, Line, ReleaseDate, ReleaseKind,
};
pub use rules::{Rule, RULES};

/// Classify a single changelog line
///
/// Rules are evaluated in order and the first match wins; a line no rule
/// accepts is `Classification::Malformed`.
pub fn classify_line(line: &str) -> Classification {
    RULES
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or_else(|| Classification::Malformed(line.to_string()))
}
