//! Command-line front end
//!
//! Opens the input, runs the driver and turns the outcome into output and an
//! exit status. Validation itself never exits the process.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde_json::json;

use crate::config::{Config, OutputFormat};
use crate::driver::{Driver, Outcome};
use crate::validation::format_diagnostic;

/// Exit status when the changelog is rejected
pub const EXIT_REJECTED: u8 = 1;
/// Exit status for I/O and configuration failures
pub const EXIT_FAILURE: u8 = 2;

/// Entry point of the `changelog-check` binary
pub fn run() -> ExitCode {
    let config = match Config::from_args_and_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    init_logging(&config.log_level);
    if !config.has_config_file() {
        log::debug!("No settings file found, using defaults");
    }
    if let Some(path) = &config.config_path {
        log::info!("Using settings from {}", path.display());
    }

    match execute(&config) {
        Ok((source, outcome)) => {
            println!("{}", render(config.format, &source, &outcome));
            if outcome.is_accepted() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_REJECTED)
            }
        }
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Validate the configured input, returning its label and the outcome
pub fn execute(config: &Config) -> Result<(String, Outcome)> {
    let driver = Driver::new(config.options);

    match &config.input {
        Some(path) => {
            let source = path.display().to_string();
            let file = File::open(path).with_context(|| format!("Failed to open {}", source))?;
            let outcome = driver
                .run_reader(BufReader::new(file))
                .with_context(|| format!("Failed to read {}", source))?;
            Ok((source, outcome))
        }
        None => {
            let source = stdin_label();
            let outcome = driver
                .run_reader(io::stdin().lock())
                .context("Failed to read standard input")?;
            Ok((source, outcome))
        }
    }
}

/// Name of whatever is attached to standard input, when the OS tells us
fn stdin_label() -> String {
    fs::read_link("/proc/self/fd/0")
        .map(|target| target.display().to_string())
        .unwrap_or_else(|_| "<stdin>".to_string())
}

/// Format an outcome for stdout
pub fn render(format: OutputFormat, source: &str, outcome: &Outcome) -> String {
    match (format, outcome) {
        (OutputFormat::Text, Outcome::Accepted(_)) => "Parsed successfully!".to_string(),
        (OutputFormat::Text, Outcome::Rejected(diagnostic)) => {
            format_diagnostic(source, diagnostic)
        }
        (OutputFormat::Json, Outcome::Accepted(summary)) => json!({
            "status": "ok",
            "source": source,
            "summary": summary,
        })
        .to_string(),
        (OutputFormat::Json, Outcome::Rejected(diagnostic)) => json!({
            "status": "error",
            "source": source,
            "diagnostic": diagnostic,
        })
        .to_string(),
    }
}
