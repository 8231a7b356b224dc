//! Pre-commit check for committed terratest SKIP environment overrides.
//!
//! The IaC integration tests read `SKIP_*` environment variables to skip
//! expensive test stages. Developers routinely uncomment `os.Setenv` lines
//! that set those variables while iterating locally, and those lines must
//! never land in a commit. This crate parses each Go test file handed to it,
//! walks a narrow set of syntactic contexts, and fails the check when a file
//! contains an active (uncommented) `os.Setenv("SKIP_...", ...)` call.

pub mod analyzer;
pub mod cli;
pub mod entry_point;
pub mod logging;
