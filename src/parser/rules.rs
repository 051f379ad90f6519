//! Line Shape Rules
//!
//! Ordered table of regex rules. The first rule whose pattern matches and
//! whose builder accepts the captures decides the classification.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::classification::{Architecture, Classification, EntryType, ReleaseDate, ReleaseKind};

/// A single line-shape rule
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>, &str) -> Option<Classification>,
}

impl Rule {
    fn new(
        name: &'static str,
        pattern: &str,
        build: fn(&Captures<'_>, &str) -> Option<Classification>,
    ) -> Self {
        let pattern = Regex::new(pattern).unwrap_or_else(|e| panic!("invalid rule `{name}`: {e}"));
        Self {
            name,
            pattern,
            build,
        }
    }

    /// Apply the rule, returning `None` when it does not match
    pub fn apply(&self, line: &str) -> Option<Classification> {
        let captures = self.pattern.captures(line)?;
        (self.build)(&captures, line)
    }
}

/// All rules, in evaluation order
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("major-version", r"^([0-9]+):$", |caps, _| {
            Some(Classification::MajorVersion(digits(caps, 1)))
        }),
        Rule::new("task", r"^  - task: (http.+)$", |caps, _| {
            Some(Classification::TaskDeclaration {
                link: caps[1].to_string(),
            })
        }),
        Rule::new("task-like", r"^  - task: ", |_, line| {
            Some(Classification::MalformedTask(line.to_string()))
        }),
        Rule::new(
            "release",
            r"^  - (release|prerelease): ([0-9]+)$",
            |caps, _| {
                let kind = match &caps[1] {
                    "prerelease" => ReleaseKind::Prerelease,
                    _ => ReleaseKind::Release,
                };
                Some(Classification::ReleaseDeclaration {
                    kind,
                    minor: digits(caps, 2),
                })
            },
        ),
        Rule::new("release-like", r"^  - (release|prerelease): ", |_, line| {
            Some(Classification::MalformedRelease(line.to_string()))
        }),
        Rule::new(
            "arch",
            r"^    arch: ((stm32|avr|at32)(, (stm32|avr|at32))*)$",
            |caps, _| {
                caps[1]
                    .split(", ")
                    .map(Architecture::from_name)
                    .collect::<Option<Vec<_>>>()
                    .map(Classification::Architecture)
            },
        ),
        Rule::new(
            "type",
            r"^    (feature|bug|internal|info): \|$",
            |caps, _| EntryType::from_name(&caps[1]).map(Classification::EntryType),
        ),
        Rule::new("description-start", r"^      (\S.*)$", |caps, _| {
            Some(Classification::DescriptionFirstLine(caps[1].to_string()))
        }),
        Rule::new("description", r"^      (.*)$", |caps, _| {
            Some(Classification::DescriptionContinuation(caps[1].to_string()))
        }),
        Rule::new(
            "date",
            r"^    date: ([0-9]{2})\.([0-9]{2})\.([0-9]{2})$",
            |caps, _| {
                Some(Classification::Date(ReleaseDate {
                    day: caps[1].parse().ok()?,
                    month: caps[2].parse().ok()?,
                    year: caps[3].parse().ok()?,
                }))
            },
        ),
        Rule::new("dependencies", r"^    dependencies:( \[\])?$", |caps, _| {
            Some(Classification::Dependencies {
                listed_empty: caps.get(1).is_some(),
            })
        }),
        Rule::new("base", r"^    base: ([0-9]*)$", |caps, _| {
            let minor = digits(caps, 1);
            Some(Classification::Base((!minor.is_empty()).then_some(minor)))
        }),
        Rule::new("protocol", r"^    protocol: ([0-9]+)$", |caps, _| {
            Some(Classification::Protocol(digits(caps, 1)))
        }),
        Rule::new("blank", r"^$", |_, _| Some(Classification::Blank)),
    ]
});

/// Digit-only capture group, unbounded in length
fn digits(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
