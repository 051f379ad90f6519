//! Configuration management for the changelog validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML settings file (explicit, project or user-global)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::validation::EngineOptions;

/// Name of the settings file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".changelog-check.toml";

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line arguments for the changelog validator
#[derive(Debug, Parser)]
#[command(name = "changelog-check")]
#[command(about = "Validate the structure of a changelog file")]
#[command(version)]
pub struct Args {
    /// Changelog to validate; standard input when omitted or `-`
    pub file: Option<PathBuf>,

    /// Settings file to use instead of the project or user one
    #[arg(long, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Reject blocks that appear before the first `<major>:` line
    #[arg(long, overrides_with = "no_require_major_version")]
    pub require_major_version: bool,

    /// Accept blocks before the first `<major>:` line, even if the settings file requires one
    #[arg(long, overrides_with = "require_major_version")]
    pub no_require_major_version: bool,

    /// Accept input whose last block is complete but not followed by an empty line
    #[arg(long, overrides_with = "require_terminator")]
    pub allow_unterminated: bool,

    /// Require the empty line after the last block, even if the settings file allows it
    #[arg(long, overrides_with = "allow_unterminated")]
    pub require_terminator: bool,

    /// Log level for diagnostics output on stderr
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub validation: Option<EngineOptions>,
}

impl FileConfig {
    /// Load a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Input file, `None` for standard input
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub options: EngineOptions,
    pub log_level: String,
    /// Settings file that was applied, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_path = match args.config {
            Some(path) => Some(path),
            None => Self::discover_config_file(),
        };

        let file = match &config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let overrides = ArgOverrides {
            format: args.format,
            require_major_version: flag_pair(
                args.require_major_version,
                args.no_require_major_version,
            ),
            require_block_terminator: flag_pair(args.require_terminator, args.allow_unterminated),
            log_level: args.log_level,
        };

        Ok(Self::merge(args.file, file, config_path, overrides))
    }

    /// Whether a settings file contributed to this configuration
    pub fn has_config_file(&self) -> bool {
        self.config_path.is_some()
    }

    /// Project file first, then the user-global one
    fn discover_config_file() -> Option<PathBuf> {
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }

        let user = dirs::config_dir()?.join("changelog-check").join("config.toml");
        user.is_file().then_some(user)
    }

    fn merge(
        input: Option<PathBuf>,
        file: FileConfig,
        config_path: Option<PathBuf>,
        overrides: ArgOverrides,
    ) -> Self {
        let mut options = file.validation.unwrap_or_default();
        if let Some(required) = overrides.require_major_version {
            options.require_major_version = required;
        }
        if let Some(required) = overrides.require_block_terminator {
            options.require_block_terminator = required;
        }

        Config {
            input: input.filter(|path| path.as_os_str() != "-"),
            format: overrides.format.or(file.format).unwrap_or_default(),
            options,
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "warn".to_string()),
            config_path,
        }
    }
}

/// Values given on the command line that take precedence over the file
struct ArgOverrides {
    format: Option<OutputFormat>,
    require_major_version: Option<bool>,
    require_block_terminator: Option<bool>,
    log_level: Option<String>,
}

/// `Some` when one flag of an on/off pair was given
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("changelog-check").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults_without_file() {
        let config = Config::merge(
            None,
            FileConfig::default(),
            None,
            ArgOverrides {
                format: None,
                require_major_version: None,
                require_block_terminator: None,
                log_level: None,
            },
        );
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.options, EngineOptions::default());
        assert_eq!(config.log_level, "warn");
        assert!(!config.has_config_file());
    }

    #[test]
    fn test_dash_means_stdin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::from_args(args(&["--config", &path, "-"])).unwrap();
        assert_eq!(config.input, None);

        let config = Config::from_args(args(&["--config", &path, "CHANGELOG.yaml"])).unwrap();
        assert_eq!(config.input, Some(PathBuf::from("CHANGELOG.yaml")));
    }

    #[test]
    fn test_file_values_are_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "format = \"json\"\nlog_level = \"debug\"\n\n[validation]\nrequire_major_version = true\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::from_args(args(&["--config", &path])).unwrap();
        assert!(config.has_config_file());
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert!(config.options.require_major_version);
        assert!(config.options.require_block_terminator);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "format = \"json\"\nlog_level = \"debug\"\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::from_args(args(&[
            "--config",
            &path,
            "--format",
            "text",
            "--log-level",
            "trace",
            "--allow-unterminated",
        ]))
        .unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_level, "trace");
        assert!(!config.options.require_block_terminator);
    }

    #[test]
    fn test_flags_undo_file_options() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[validation]\nrequire_major_version = true\nrequire_block_terminator = false\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::from_args(args(&["--config", &path])).unwrap();
        assert!(config.options.require_major_version);
        assert!(!config.options.require_block_terminator);

        let config = Config::from_args(args(&[
            "--config",
            &path,
            "--no-require-major-version",
            "--require-terminator",
        ]))
        .unwrap();
        assert!(!config.options.require_major_version);
        assert!(config.options.require_block_terminator);
    }

    #[test]
    fn test_last_flag_of_a_pair_wins() {
        let parsed = args(&["--allow-unterminated", "--require-terminator"]);
        assert!(parsed.require_terminator);
        assert!(!parsed.allow_unterminated);

        let parsed = args(&["--require-major-version", "--no-require-major-version"]);
        assert_eq!(
            flag_pair(parsed.require_major_version, parsed.no_require_major_version),
            Some(false)
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = true").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = Config::from_args(args(&["--config", &path])).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = Config::from_args(args(&["--config", "/nonexistent/changelog-check.toml"]))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
