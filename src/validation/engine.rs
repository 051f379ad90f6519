//! Validation Engine
//!
//! Owns the running state of a validation pass and drives the block
//! grammars one line at a time. The first violation ends the run.

use serde::{Deserialize, Serialize};

use crate::grammar::{release, task, Expected, ReleaseState, TaskState, Transition, Violation};
use crate::parser::classification::has_exact_indent;
use crate::parser::{classify_line, Classification, Line, ReleaseKind};
use crate::validation::diagnostic::{Diagnostic, DiagnosticKind};

/// Which kind of block, if any, is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Undetermined,
    InTask(TaskState),
    InRelease(ReleaseState),
}

/// Mutable state of one validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    pub mode: Mode,
    /// Number of the last line processed, 0 before the first
    pub current_line: usize,
    /// Most recent `<major>:` marker
    pub major_version: Option<String>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Undetermined,
            current_line: 0,
            major_version: None,
        }
    }
}

/// Knobs that tighten or relax the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Reject blocks that appear before any major version marker
    pub require_major_version: bool,
    /// Reject input that ends without the blank line closing the last block
    pub require_block_terminator: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            require_major_version: false,
            require_block_terminator: true,
        }
    }
}

/// What a successful run saw
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub lines: usize,
    pub major_versions: Vec<String>,
    pub tasks: usize,
    pub releases: usize,
    pub prereleases: usize,
}

/// Single-pass changelog validator
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    options: EngineOptions,
    state: ValidationState,
    summary: ValidationSummary,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl ValidationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            state: ValidationState::new(),
            summary: ValidationSummary::default(),
        }
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Process the next line of input
    pub fn process(&mut self, line: &Line) -> Result<(), Diagnostic> {
        self.state.current_line = line.number;
        self.summary.lines = line.number;

        let class = classify_line(&line.text);
        log::trace!("line {}: {} in {:?}", line.number, class.name(), self.state.mode);

        let outcome = match (self.state.mode, &class) {
            (_, Classification::MajorVersion(version)) => {
                self.record_major_version(version);
                Ok(())
            }
            (Mode::Undetermined, _) => self.open_block(&class, &line.text),
            (Mode::InTask(state), _) => {
                task::step(state, &class).map(|t| self.apply(t, Mode::InTask))
            }
            (Mode::InRelease(state), _) => {
                release::step(state, &class).map(|t| self.apply(t, Mode::InRelease))
            }
        };

        outcome.map_err(|violation| {
            log::debug!(
                "line {} rejected: {} (expected {})",
                line.number,
                violation.kind,
                violation.expected
            );
            Diagnostic::new(line.number, line.text.as_str(), violation.kind, violation.expected)
        })
    }

    /// Conclude the run once input is exhausted
    pub fn finish(self) -> Result<ValidationSummary, Diagnostic> {
        let (satisfied, expected) = match self.state.mode {
            Mode::Undetermined => return Ok(self.summary),
            Mode::InTask(state) => (state.is_satisfied(), state.expected()),
            Mode::InRelease(state) => (state.is_satisfied(), state.expected()),
        };

        if satisfied && !self.options.require_block_terminator {
            log::warn!(
                "input ended after line {} without closing the last block",
                self.state.current_line
            );
            return Ok(self.summary);
        }

        Err(Diagnostic::new(
            self.state.current_line + 1,
            "",
            DiagnosticKind::IncompleteStreamEnd,
            expected,
        ))
    }

    fn record_major_version(&mut self, version: &str) {
        log::debug!("line {}: major version {}", self.state.current_line, version);
        self.state.major_version = Some(version.to_string());
        self.summary.major_versions.push(version.to_string());
    }

    fn open_block(&mut self, class: &Classification, text: &str) -> Result<(), Violation> {
        match class {
            Classification::TaskDeclaration { link } => {
                self.check_major_version()?;
                log::debug!("line {}: task {}", self.state.current_line, link);
                self.state.mode = Mode::InTask(TaskState::AwaitingArch);
                self.summary.tasks += 1;
                Ok(())
            }
            Classification::ReleaseDeclaration { kind, minor } => {
                self.check_major_version()?;
                log::debug!("line {}: {} {}", self.state.current_line, kind, minor);
                self.state.mode = Mode::InRelease(ReleaseState::AwaitingDate);
                match kind {
                    ReleaseKind::Release => self.summary.releases += 1,
                    ReleaseKind::Prerelease => self.summary.prereleases += 1,
                }
                Ok(())
            }
            Classification::MalformedTask(_) => Err(Violation::malformed(Expected::TaskLink)),
            Classification::MalformedRelease(_) => {
                Err(Violation::malformed(Expected::ReleaseNumber))
            }
            Classification::Blank => Err(Violation::unexpected(Expected::BlockDeclaration)),
            _ if !has_exact_indent(text, 2) => {
                Err(Violation::indentation(Expected::DeclarationIndent))
            }
            _ => Err(Violation::unexpected(Expected::BlockDeclaration)),
        }
    }

    fn check_major_version(&self) -> Result<(), Violation> {
        if self.options.require_major_version && self.state.major_version.is_none() {
            Err(Violation::unexpected(Expected::MajorVersion))
        } else {
            Ok(())
        }
    }

    fn apply<S>(&mut self, transition: Transition<S>, wrap: fn(S) -> Mode) {
        match transition {
            Transition::Continue(state) => self.state.mode = wrap(state),
            Transition::Closed => {
                log::debug!("line {}: block closed", self.state.current_line);
                self.state.mode = Mode::Undetermined;
            }
        }
    }
}

/// Validate an in-memory changelog document
pub fn validate_str(content: &str, options: EngineOptions) -> Result<ValidationSummary, Diagnostic> {
    let mut engine = ValidationEngine::new(options);
    for (idx, text) in content.lines().enumerate() {
        engine.process(&Line::new(idx + 1, text))?;
    }
    engine.finish()
}
