//! Configuration for the testlens command line
//!
//! This module provides the argument types for the `analyze` and `compare`
//! subcommands along with output and logging options.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use testlens_extract::DEFAULT_FLATTEN_CAP;

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// testlens - extract, categorize and compare test results
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "testlens")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory receiving the JSON exports
    ///
    /// Created if missing. Defaults to ./output.
    #[arg(short, long, global = true, env = "TESTLENS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// When enabled, logs which grammar read the document and which
    /// extraction tier produced the records. Logs are written to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract test records from a report and categorize its failures
    ///
    /// Writes all_tests.json, failure_details.json, failure_summary.json
    /// and report.json into the output directory.
    ///
    /// Example:
    ///   testlens analyze target/nextest/ci/junit.xml -o reports
    Analyze {
        /// Report file (XML, HTML or anything tag-shaped)
        input: PathBuf,

        /// JSON rule table replacing the built-in failure categories
        ///
        /// Format: [{"label": "Timeout", "patterns": ["timed out"]}]
        #[arg(long, env = "TESTLENS_RULES")]
        rules: Option<PathBuf>,

        /// Maximum records produced when falling back to flattening
        #[arg(long, default_value_t = DEFAULT_FLATTEN_CAP)]
        flatten_cap: usize,
    },

    /// Compare a baseline run with a candidate run
    ///
    /// Either side may be a report file or an all_tests.json export.
    /// Writes comparison.json into the output directory.
    ///
    /// Example:
    ///   testlens compare monday.xml tuesday.xml
    Compare {
        /// Baseline run
        baseline: PathBuf,

        /// Candidate run
        candidate: PathBuf,
    },
}

impl Config {
    /// Get the output directory, using a default if not specified
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input report or rule file doesn't exist
    /// - The output path exists but is not a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            Some(Command::Analyze { input, rules, .. }) => {
                require_file(input)?;
                if let Some(rules) = rules {
                    if !rules.exists() {
                        return Err(ConfigError::RulesNotFound(rules.clone()));
                    }
                }
            }
            Some(Command::Compare {
                baseline,
                candidate,
            }) => {
                require_file(baseline)?;
                require_file(candidate)?;
            }
            None => {}
        }

        let output = self.output_dir();
        if output.exists() && !output.is_dir() {
            return Err(ConfigError::OutputNotDirectory(output));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

fn require_file(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::InputNotFound(path.to_path_buf()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input report not found
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    /// Rule table not found
    #[error("Rule file not found: {0}")]
    RulesNotFound(PathBuf),

    /// Output path is not a directory
    #[error("Output path is not a directory: {0}")]
    OutputNotDirectory(PathBuf),
}
