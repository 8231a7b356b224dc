//! Command line surface of the check.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    name = "check-skip-env",
    version,
    about = "Checks that no uncommented os.Setenv calls setting terratest SKIP \
             environment variables are committed in Go test files",
    long_about = None
)]
pub struct Cli {
    /// Go source files to check.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the log level.
    #[arg(
        long = "log-level",
        alias = "loglevel",
        value_enum,
        value_name = "LEVEL",
        default_value = "info"
    )]
    pub log_level: LogLevel,
}

/// Log verbosity levels, named after the levels the rest of the gruntwork
/// tooling uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only unrecoverable failures.
    Panic,
    /// Fatal failures.
    Fatal,
    /// Errors.
    Error,
    /// Warnings and errors.
    Warning,
    /// Informational output (default).
    Info,
    /// Verbose diagnostics; also enables stack traces in gruntwork libraries.
    Debug,
}

impl LogLevel {
    /// Maps the level onto the tracing level hierarchy. Panic and fatal have
    /// no tracing counterpart and collapse into `ERROR`.
    #[must_use]
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Panic | LogLevel::Fatal | LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }

    /// Returns `true` when the level asks for debugging output.
    #[must_use]
    pub fn is_debug(self) -> bool {
        matches!(self, LogLevel::Debug)
    }
}
