//! Global log setup for the check.

use crate::cli::LogLevel;

/// Environment variable read by gruntwork libraries to enable stack trace
/// output on errors.
pub const GRUNTWORK_DEBUG_ENV: &str = "GRUNTWORK_DEBUG";

/// Initializes the global tracing subscriber at the requested level, writing
/// to stderr without targets or timestamps.
///
/// Safe to call more than once; later calls keep the first subscriber. The
/// integration tests drive the entry point repeatedly in one process and
/// rely on this.
pub fn init(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level.to_tracing_level())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();

    if level.is_debug() {
        std::env::set_var(GRUNTWORK_DEBUG_ENV, "true");
    }
}
