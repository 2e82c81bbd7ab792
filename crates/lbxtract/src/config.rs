//! Command-line configuration.
//!
//! Values come from CLI arguments, then environment variables
//! (`LBXTRACT_OUTPUT`, `LBXTRACT_FORMAT`, `LBXTRACT_LOG_LEVEL`), then
//! defaults.

use crate::error::ConfigError;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Name of the directory extracted archives are placed under
pub const EXTRACTED_DIR: &str = "EXTRACTED";

/// Extractor configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lbxtract",
    about = "Extract resources from LBX archives",
    version,
    long_about = "Extracts sounds, music, video and nested archives from the LBX files of \
                  Master of Magic, Master of Orion and Master of Orion 2. Every *.LBX file in \
                  DIR is unpacked into EXTRACTED/<NAME>/."
)]
pub struct ExtractConfig {
    /// Directory holding the LBX files (defaults to the executable's directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output root (defaults to DIR/EXTRACTED)
    #[arg(short, long, env = "LBXTRACT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(
        short = 'f',
        long,
        value_enum,
        env = "LBXTRACT_FORMAT",
        default_value = "text"
    )]
    pub format: OutputFormat,

    /// Show what would be extracted without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,

    /// Set the logging level (overridden by RUST_LOG)
    #[arg(
        short,
        long,
        value_enum,
        env = "LBXTRACT_LOG_LEVEL",
        default_value = "warn"
    )]
    pub log_level: LogLevel,
}

/// Logging verbosity.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-entry decisions
    Trace,
    /// Classification and slicing details
    Debug,
    /// Per-archive progress
    Info,
    /// Skipped archives
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

impl ExtractConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Directory to scan: the given one, or the executable's own directory.
    pub fn input_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
        Ok(exe
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
    }

    /// Root under which per-archive directories are created.
    pub fn output_root(&self, input_dir: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| input_dir.join(EXTRACTED_DIR))
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the input directory is missing or is not
    /// a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dir = self.input_dir()?;
        if !dir.exists() {
            return Err(ConfigError::MissingInput(dir));
        }
        if !dir.is_dir() {
            return Err(ConfigError::NotADirectory(dir));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ExtractConfig {
        ExtractConfig::try_parse_from(std::iter::once("lbxtract").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["/games/moo"]);
        assert_eq!(config.dir, Some(PathBuf::from("/games/moo")));
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.dry_run);
        assert_eq!(
            config.output_root(Path::new("/games/moo")),
            PathBuf::from("/games/moo/EXTRACTED")
        );
    }

    #[test]
    fn test_output_override() {
        let config = parse(&["--output", "/tmp/out", "-n", "."]);
        assert_eq!(config.output_root(Path::new(".")), PathBuf::from("/tmp/out"));
        assert!(config.dry_run);
    }

    #[test]
    fn test_at_most_one_directory() {
        let result =
            ExtractConfig::try_parse_from(["lbxtract", "one", "two"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_input_is_executable_dir() {
        let config = parse(&[]);
        let dir = config.input_dir().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(dir.as_path()), exe.parent());
    }

    #[test]
    fn test_validate_rejects_missing_dir() {
        let config = parse(&["/definitely/not/here/lbx"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingInput(_))
        ));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
    }
}
