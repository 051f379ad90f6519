//! Line Classifications
//!
//! Plain data describing the shape a changelog line was recognized as.
//! No grammar logic here - the state machines live in `crate::grammar`.

use std::fmt;

/// One line of input together with its 1-based position in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Target architecture named in an `arch:` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Stm32,
    Avr,
    At32,
}

impl Architecture {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stm32" => Some(Self::Stm32),
            "avr" => Some(Self::Avr),
            "at32" => Some(Self::At32),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stm32 => "stm32",
            Self::Avr => "avr",
            Self::At32 => "at32",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of change announced by a `<type>: |` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Feature,
    Bug,
    Internal,
    Info,
}

impl EntryType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "feature" => Some(Self::Feature),
            "bug" => Some(Self::Bug),
            "internal" => Some(Self::Internal),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Internal => "internal",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a version block is a final release or a prerelease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseKind {
    Release,
    Prerelease,
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => f.write_str("release"),
            Self::Prerelease => f.write_str("prerelease"),
        }
    }
}

/// `dd.mm.yy` date of a release, kept as the two-digit groups written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseDate {
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.day, self.month, self.year)
    }
}

/// The recognized shape of a single changelog line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `1:` - opens a major version section; digits kept as written
    MajorVersion(String),
    /// `  - task: http...`
    TaskDeclaration { link: String },
    /// `  - task: ` followed by something that is not a link
    MalformedTask(String),
    /// `  - release: 7` or `  - prerelease: 7`
    ReleaseDeclaration { kind: ReleaseKind, minor: String },
    /// `  - release: ` followed by something that is not a number
    MalformedRelease(String),
    /// `    arch: stm32, avr`
    Architecture(Vec<Architecture>),
    /// `    feature: |`
    EntryType(EntryType),
    /// Six spaces followed by a non-whitespace character
    DescriptionFirstLine(String),
    /// Six spaces followed by anything, including nothing
    DescriptionContinuation(String),
    /// `    date: 01.02.24`
    Date(ReleaseDate),
    /// `    dependencies:` or `    dependencies: []`
    Dependencies { listed_empty: bool },
    /// `    base: 3` or the `    base: ` placeholder
    Base(Option<String>),
    /// `    protocol: 3`
    Protocol(String),
    /// The empty line separating blocks
    Blank,
    /// Anything else
    Malformed(String),
}

impl Classification {
    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::MajorVersion(_) => "major-version",
            Self::TaskDeclaration { .. } => "task",
            Self::MalformedTask(_) => "malformed-task",
            Self::ReleaseDeclaration { .. } => "release",
            Self::MalformedRelease(_) => "malformed-release",
            Self::Architecture(_) => "arch",
            Self::EntryType(_) => "type",
            Self::DescriptionFirstLine(_) => "description-start",
            Self::DescriptionContinuation(_) => "description",
            Self::Date(_) => "date",
            Self::Dependencies { .. } => "dependencies",
            Self::Base(_) => "base",
            Self::Protocol(_) => "protocol",
            Self::Blank => "blank",
            Self::Malformed(_) => "malformed",
        }
    }

    /// True for lines sitting at the four-space field level of a block:
    /// every recognized field, plus unrecognized lines that are indented by
    /// exactly four spaces before their first non-whitespace character.
    pub fn is_field_indented(&self) -> bool {
        match self {
            Self::Architecture(_)
            | Self::EntryType(_)
            | Self::Date(_)
            | Self::Dependencies { .. }
            | Self::Base(_)
            | Self::Protocol(_) => true,
            Self::Malformed(raw) => has_exact_indent(raw, 4),
            _ => false,
        }
    }
}

/// `width` spaces followed by a non-whitespace character
pub(crate) fn has_exact_indent(text: &str, width: usize) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > width
        && bytes[..width].iter().all(|&b| b == b' ')
        && text[width..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace())
}
