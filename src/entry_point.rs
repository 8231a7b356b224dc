//! Shared entry point for the check-skip-env binary.
//!
//! The binary delegates here so the whole CLI flow stays drivable from
//! tests: `run_with_args_to` takes the report writer as a parameter and
//! returns the process exit code instead of exiting.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use crate::analyzer;
use crate::cli::Cli;
use crate::logging;

/// Exit code for a clean run.
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when offending files were found.
pub const EXIT_FAILED_CHECK: i32 = 1;
/// Exit code for usage errors and internal failures.
pub const EXIT_USAGE: i32 = 2;

/// Header line printed ahead of the offender list. CI log scrapers match on
/// this exact text.
pub const FAILURE_HEADER: &str =
    "Found files with os.Setenv calls setting terratest SKIP environment variables.";

/// Runs the check with the given arguments, reporting on stderr.
///
/// # Errors
///
/// Returns an error when a file cannot be read or parsed.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stderr())
}

/// Runs the check with the given arguments, writing the report to `writer`.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error when a file cannot be read or parsed. Usage errors are
/// not errors here; they are rendered into `writer` and reported through the
/// exit code.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["check-skip-env".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    Ok(EXIT_CLEAN)
                }
                _ => {
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    Ok(EXIT_USAGE)
                }
            };
        }
    };

    logging::init(cli.log_level);
    debug!("checking {} file(s)", cli.files.len());

    // FailedCheck accumulates across every file; read and parse failures
    // abort immediately.
    let mut offenders: Vec<PathBuf> = Vec::new();
    for file in &cli.files {
        info!("Checking file {}", file.display());
        let offends = analyzer::has_skip_env_set_calls(file)
            .with_context(|| format!("failed to check {}", file.display()))?;
        if offends {
            offenders.push(file.clone());
        }
    }

    if offenders.is_empty() {
        return Ok(EXIT_CLEAN);
    }

    writeln!(writer, "{FAILURE_HEADER}")?;
    for file in &offenders {
        writeln!(writer, "\t- {}", file.display())?;
    }
    writer.flush()?;
    Ok(EXIT_FAILED_CHECK)
}
