//! Block Grammars
//!
//! Two independent finite-state machines over line classifications, one for
//! task blocks and one for release/prerelease blocks. Transition functions
//! are pure: they take the current sub-state and a classification and return
//! either the next step or the violation that halts validation.

pub mod description;
pub mod release;
pub mod task;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::parser::Classification;
use crate::validation::DiagnosticKind;

pub use release::ReleaseState;
pub use task::TaskState;

/// What a grammar does with an accepted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// The block stays open in the given sub-state
    Continue(S),
    /// A blank separator closed the block
    Closed,
}

/// A rejected line: what went wrong and what was expected instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub kind: DiagnosticKind,
    pub expected: Expected,
}

impl Violation {
    pub fn indentation(expected: Expected) -> Self {
        Self {
            kind: DiagnosticKind::IndentationViolation,
            expected,
        }
    }

    pub fn unexpected(expected: Expected) -> Self {
        Self {
            kind: DiagnosticKind::UnexpectedConstruct,
            expected,
        }
    }

    pub fn malformed(expected: Expected) -> Self {
        Self {
            kind: DiagnosticKind::MalformedDeclaration,
            expected,
        }
    }
}

/// Result of feeding one classification to a grammar
pub type Step<S> = Result<Transition<S>, Violation>;

/// The construct a diagnostic demands in place of the offending line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    BlockDeclaration,
    DeclarationIndent,
    TaskLink,
    ReleaseNumber,
    MajorVersion,
    FieldIndent,
    DescriptionIndent,
    Architecture,
    EntryType,
    Description,
    DescriptionOrSeparator,
    Date,
    DependenciesOrBase,
    Dependencies,
    Protocol,
    EntryTypeOrSeparator,
}

impl Expected {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlockDeclaration => "`  - {task,release,prerelease}:`",
            Self::DeclarationIndent => "2 spaces `  ` before `- {task,release,prerelease}:`",
            Self::TaskLink => "`  - task: <link-to-task>`",
            Self::ReleaseNumber => "`  - release: <minor-version-number>`",
            Self::MajorVersion => "`<major-version-number>:` before the first block",
            Self::FieldIndent => "indent 4 spaces `    `",
            Self::DescriptionIndent => "indent 6 spaces `      `",
            Self::Architecture => "`    arch: {stm32,avr,at32}`",
            Self::EntryType => "`    {feature,bug,internal,info}: |`",
            Self::Description => "`      <description>`",
            Self::DescriptionOrSeparator => "`      <description>` or an empty line",
            Self::Date => "`    date: <dd.mm.yy>`",
            Self::DependenciesOrBase => "`    dependencies:` or `    base: <minor-version-number>`",
            Self::Dependencies => "`    dependencies:`",
            Self::Protocol => "`    protocol: <number-of-protocol>`",
            Self::EntryTypeOrSeparator => "`    {feature,bug,internal,info}: |` or an empty line",
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Expected {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Fields before the type line sit at four spaces; blank lines are judged
/// by the field rules instead.
fn check_field_indent(class: &Classification) -> Result<(), Violation> {
    if matches!(class, Classification::Blank) || class.is_field_indented() {
        Ok(())
    } else {
        Err(Violation::indentation(Expected::FieldIndent))
    }
}
