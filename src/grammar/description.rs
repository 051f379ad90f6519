//! Multi-line description body shared by task blocks and the optional
//! trailing section of release blocks.

use super::{Expected, Step, Transition, Violation};
use crate::parser::Classification;

/// Position inside a description body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionState {
    /// The type line was read; the first description line must follow
    AwaitingStart,
    /// At least one description line was read
    InBody,
}

pub fn step(state: DescriptionState, class: &Classification) -> Step<DescriptionState> {
    match (state, class) {
        (DescriptionState::AwaitingStart, Classification::DescriptionFirstLine(_)) => {
            Ok(Transition::Continue(DescriptionState::InBody))
        }
        (
            DescriptionState::InBody,
            Classification::DescriptionFirstLine(_) | Classification::DescriptionContinuation(_),
        ) => Ok(Transition::Continue(DescriptionState::InBody)),
        (DescriptionState::InBody, Classification::Blank) => Ok(Transition::Closed),
        // Anything unrecognized here was not indented as a description line
        (_, Classification::Malformed(_)) => {
            Err(Violation::indentation(Expected::DescriptionIndent))
        }
        (DescriptionState::AwaitingStart, _) => Err(Violation::unexpected(Expected::Description)),
        (DescriptionState::InBody, _) => {
            Err(Violation::unexpected(Expected::DescriptionOrSeparator))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DiagnosticKind;

    #[test]
    fn test_first_line_opens_body() {
        let result = step(
            DescriptionState::AwaitingStart,
            &Classification::DescriptionFirstLine("adds X".to_string()),
        );
        assert_eq!(result, Ok(Transition::Continue(DescriptionState::InBody)));
    }

    #[test]
    fn test_blank_continuation_does_not_open_body() {
        let err = step(
            DescriptionState::AwaitingStart,
            &Classification::DescriptionContinuation(String::new()),
        )
        .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnexpectedConstruct);
        assert_eq!(err.expected, Expected::Description);
    }

    #[test]
    fn test_blank_continuation_keeps_body_open() {
        let result = step(
            DescriptionState::InBody,
            &Classification::DescriptionContinuation(String::new()),
        );
        assert_eq!(result, Ok(Transition::Continue(DescriptionState::InBody)));
    }

    #[test]
    fn test_blank_line_closes_body() {
        assert_eq!(
            step(DescriptionState::InBody, &Classification::Blank),
            Ok(Transition::Closed)
        );
        assert!(step(DescriptionState::AwaitingStart, &Classification::Blank).is_err());
    }

    #[test]
    fn test_misindented_line_is_indentation_violation() {
        let err = step(
            DescriptionState::InBody,
            &Classification::Malformed("     five spaces".to_string()),
        )
        .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::IndentationViolation);
        assert_eq!(err.expected, Expected::DescriptionIndent);
    }

    #[test]
    fn test_new_block_without_separator_is_rejected() {
        let err = step(
            DescriptionState::InBody,
            &Classification::TaskDeclaration {
                link: "http://tracker/2".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnexpectedConstruct);
        assert_eq!(err.expected, Expected::DescriptionOrSeparator);
    }
}
