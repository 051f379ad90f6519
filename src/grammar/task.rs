//! Task block grammar
//!
//! ```text
//!   - task: http://tracker/123
//!     arch: stm32, avr
//!     feature: |
//!       description, one or more lines
//!
//! ```

use super::description::{self, DescriptionState};
use super::{check_field_indent, Expected, Step, Transition, Violation};
use crate::parser::Classification;

/// Position inside an open task block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    AwaitingArch,
    AwaitingType,
    AwaitingDescriptionStart,
    InDescription,
}

impl TaskState {
    /// What the block still needs if input ends in this state
    pub fn expected(self) -> Expected {
        match self {
            Self::AwaitingArch => Expected::Architecture,
            Self::AwaitingType => Expected::EntryType,
            Self::AwaitingDescriptionStart => Expected::Description,
            Self::InDescription => Expected::DescriptionOrSeparator,
        }
    }

    /// All mandatory fields have been read
    pub fn is_satisfied(self) -> bool {
        self == Self::InDescription
    }
}

/// Feed one classification to an open task block
pub fn step(state: TaskState, class: &Classification) -> Step<TaskState> {
    match state {
        TaskState::AwaitingArch => {
            check_field_indent(class)?;
            match class {
                Classification::Architecture(_) => Ok(Transition::Continue(TaskState::AwaitingType)),
                _ => Err(Violation::unexpected(Expected::Architecture)),
            }
        }
        TaskState::AwaitingType => {
            check_field_indent(class)?;
            match class {
                Classification::EntryType(_) => {
                    Ok(Transition::Continue(TaskState::AwaitingDescriptionStart))
                }
                _ => Err(Violation::unexpected(Expected::EntryType)),
            }
        }
        TaskState::AwaitingDescriptionStart => {
            from_description(description::step(DescriptionState::AwaitingStart, class)?)
        }
        TaskState::InDescription => {
            from_description(description::step(DescriptionState::InBody, class)?)
        }
    }
}

fn from_description(transition: Transition<DescriptionState>) -> Step<TaskState> {
    Ok(match transition {
        Transition::Continue(DescriptionState::AwaitingStart) => {
            Transition::Continue(TaskState::AwaitingDescriptionStart)
        }
        Transition::Continue(DescriptionState::InBody) => {
            Transition::Continue(TaskState::InDescription)
        }
        Transition::Closed => Transition::Closed,
    })
}
