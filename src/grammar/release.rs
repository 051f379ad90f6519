//! Release and prerelease block grammar
//!
//! ```text
//!   - release: 7
//!     date: 01.02.24
//!     base: 6            (optional)
//!     dependencies: []
//!     protocol: 3
//!     info: |            (optional, followed by a description)
//!       description
//!
//! ```

use super::description::{self, DescriptionState};
use super::{check_field_indent, Expected, Step, Transition, Violation};
use crate::parser::Classification;

/// Position inside an open release block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseState {
    AwaitingDate,
    AwaitingDependenciesOrBase,
    /// `base` was read; it may not repeat
    AwaitingDependencies,
    AwaitingProtocol,
    AwaitingOptionalTypeOrEnd,
    AwaitingDescriptionStart,
    InDescription,
}

impl ReleaseState {
    /// What the block still needs if input ends in this state
    pub fn expected(self) -> Expected {
        match self {
            Self::AwaitingDate => Expected::Date,
            Self::AwaitingDependenciesOrBase => Expected::DependenciesOrBase,
            Self::AwaitingDependencies => Expected::Dependencies,
            Self::AwaitingProtocol => Expected::Protocol,
            Self::AwaitingOptionalTypeOrEnd => Expected::EntryTypeOrSeparator,
            Self::AwaitingDescriptionStart => Expected::Description,
            Self::InDescription => Expected::DescriptionOrSeparator,
        }
    }

    /// All mandatory fields have been read
    pub fn is_satisfied(self) -> bool {
        matches!(self, Self::AwaitingOptionalTypeOrEnd | Self::InDescription)
    }
}

/// Feed one classification to an open release block
pub fn step(state: ReleaseState, class: &Classification) -> Step<ReleaseState> {
    use ReleaseState::*;

    match state {
        AwaitingDescriptionStart => {
            return from_description(description::step(DescriptionState::AwaitingStart, class)?);
        }
        InDescription => {
            return from_description(description::step(DescriptionState::InBody, class)?);
        }
        _ => check_field_indent(class)?,
    }

    let next = match (state, class) {
        (AwaitingDate, Classification::Date(_)) => AwaitingDependenciesOrBase,
        (AwaitingDependenciesOrBase, Classification::Base(_)) => AwaitingDependencies,
        (
            AwaitingDependenciesOrBase | AwaitingDependencies,
            Classification::Dependencies { .. },
        ) => AwaitingProtocol,
        (AwaitingProtocol, Classification::Protocol(_)) => AwaitingOptionalTypeOrEnd,
        (AwaitingOptionalTypeOrEnd, Classification::Blank) => return Ok(Transition::Closed),
        (AwaitingOptionalTypeOrEnd, Classification::EntryType(_)) => AwaitingDescriptionStart,
        _ => return Err(Violation::unexpected(state.expected())),
    };
    Ok(Transition::Continue(next))
}

fn from_description(transition: Transition<DescriptionState>) -> Step<ReleaseState> {
    Ok(match transition {
        Transition::Continue(DescriptionState::AwaitingStart) => {
            Transition::Continue(ReleaseState::AwaitingDescriptionStart)
        }
        Transition::Continue(DescriptionState::InBody) => {
            Transition::Continue(ReleaseState::InDescription)
        }
        Transition::Closed => Transition::Closed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify_line;
    use crate::validation::DiagnosticKind;

    fn run(lines: &[&str]) -> Result<Transition<ReleaseState>, (usize, Violation)> {
        let mut state = ReleaseState::AwaitingDate;
        let mut last = Transition::Continue(state);
        for (idx, line) in lines.iter().enumerate() {
            last = step(state, &classify_line(line)).map_err(|v| (idx, v))?;
            match last {
                Transition::Continue(next) => state = next,
                Transition::Closed => break,
            }
        }
        Ok(last)
    }

    #[test]
    fn test_minimal_release_closes() {
        let result = run(&[
            "    date: 01.02.24",
            "    dependencies: []",
            "    protocol: 3",
            "",
        ]);
        assert_eq!(result, Ok(Transition::Closed));
    }

    #[test]
    fn test_optional_base_is_accepted() {
        let result = run(&[
            "    date: 01.02.24",
            "    base: 6",
            "    dependencies:",
            "    protocol: 3",
            "",
        ]);
        assert_eq!(result, Ok(Transition::Closed));

        let result = run(&[
            "    date: 01.02.24",
            "    base: ",
            "    dependencies:",
            "    protocol: 3",
            "",
        ]);
        assert_eq!(result, Ok(Transition::Closed));
    }

    #[test]
    fn test_trailing_description_is_accepted() {
        let result = run(&[
            "    date: 01.02.24",
            "    dependencies: []",
            "    protocol: 3",
            "    info: |",
            "      first line",
            "      ",
            "      more",
            "",
        ]);
        assert_eq!(result, Ok(Transition::Closed));
    }

    #[test]
    fn test_protocol_before_date_is_rejected() {
        let (idx, violation) = run(&["    protocol: 3", "    date: 01.02.24"]).unwrap_err();
        assert_eq!(idx, 0);
        assert_eq!(violation.kind, DiagnosticKind::UnexpectedConstruct);
        assert_eq!(violation.expected, Expected::Date);
    }

    #[test]
    fn test_protocol_before_dependencies_is_rejected() {
        let (idx, violation) =
            run(&["    date: 01.02.24", "    protocol: 3", "    dependencies:"]).unwrap_err();
        assert_eq!(idx, 1);
        assert_eq!(violation.expected, Expected::DependenciesOrBase);
    }

    #[test]
    fn test_base_may_not_repeat() {
        let (idx, violation) =
            run(&["    date: 01.02.24", "    base: 1", "    base: 2"]).unwrap_err();
        assert_eq!(idx, 2);
        assert_eq!(violation.expected, Expected::Dependencies);
    }

    #[test]
    fn test_base_after_dependencies_is_rejected() {
        let (idx, violation) =
            run(&["    date: 01.02.24", "    dependencies:", "    base: 2"]).unwrap_err();
        assert_eq!(idx, 2);
        assert_eq!(violation.expected, Expected::Protocol);
    }

    #[test]
    fn test_description_without_type_is_indentation_violation() {
        let (idx, violation) = run(&[
            "    date: 01.02.24",
            "    dependencies:",
            "    protocol: 3",
            "      stray text",
        ])
        .unwrap_err();
        assert_eq!(idx, 3);
        assert_eq!(violation.kind, DiagnosticKind::IndentationViolation);
    }

    #[test]
    fn test_unknown_field_after_protocol_is_rejected() {
        let (idx, violation) = run(&[
            "    date: 01.02.24",
            "    dependencies:",
            "    protocol: 3",
            "    notes: none",
        ])
        .unwrap_err();
        assert_eq!(idx, 3);
        assert_eq!(violation.kind, DiagnosticKind::UnexpectedConstruct);
        assert_eq!(violation.expected, Expected::EntryTypeOrSeparator);
    }

    #[test]
    fn test_satisfied_states() {
        assert!(ReleaseState::AwaitingOptionalTypeOrEnd.is_satisfied());
        assert!(ReleaseState::InDescription.is_satisfied());
        assert!(!ReleaseState::AwaitingProtocol.is_satisfied());
        assert!(!ReleaseState::AwaitingDescriptionStart.is_satisfied());
    }
}
