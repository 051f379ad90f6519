//! Driver
//!
//! Pulls lines from a source and feeds them to the validation engine until
//! the first diagnostic or the end of input. The only place in the library
//! that touches I/O.

use std::io::{self, BufRead};

use crate::parser::Line;
use crate::validation::{Diagnostic, EngineOptions, ValidationEngine, ValidationSummary};

/// Anything that can hand out lines one at a time
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines read from any buffered reader
///
/// Strips `\n` and `\r\n` terminators. Invalid UTF-8 is an I/O error.
pub struct ReaderSource<R> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }
        Ok(Some(self.buffer.clone()))
    }
}

/// Lines of an in-memory document
pub struct TextSource<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { lines: text.lines() }
    }
}

impl LineSource for TextSource<'_> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.next().map(str::to_string))
    }
}

/// Terminal result of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(ValidationSummary),
    Rejected(Diagnostic),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

/// Runs validation passes with fixed engine options
#[derive(Debug, Clone, Copy, Default)]
pub struct Driver {
    options: EngineOptions,
}

impl Driver {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Validate everything `source` yields
    ///
    /// Stops pulling lines as soon as a diagnostic is produced.
    pub fn run<S: LineSource + ?Sized>(&self, source: &mut S) -> io::Result<Outcome> {
        let mut engine = ValidationEngine::new(self.options);
        let mut number = 0;

        while let Some(text) = source.next_line()? {
            number += 1;
            if let Err(diagnostic) = engine.process(&Line::new(number, text)) {
                return Ok(Outcome::Rejected(diagnostic));
            }
        }

        log::debug!("end of input after {} lines", number);
        Ok(match engine.finish() {
            Ok(summary) => Outcome::Accepted(summary),
            Err(diagnostic) => Outcome::Rejected(diagnostic),
        })
    }

    /// Validate a buffered reader line by line
    pub fn run_reader<R: BufRead>(&self, reader: R) -> io::Result<Outcome> {
        self.run(&mut ReaderSource::new(reader))
    }
}
