//! Binary entry point for the check-skip-env pre-commit hook.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()`
//! function so the CLI flow stays testable from the library crate.

use colored::Colorize;

fn main() {
    let args = std::env::args().skip(1).collect();
    let code = match check_skip_env::entry_point::run_with_args(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            check_skip_env::entry_point::EXIT_USAGE
        }
    };
    std::process::exit(code);
}
