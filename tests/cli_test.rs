//! End to end tests for the CLI flow, driven through `run_with_args_to`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use check_skip_env::entry_point::{
    run_with_args_to, EXIT_CLEAN, EXIT_FAILED_CHECK, EXIT_USAGE, FAILURE_HEADER,
};
use check_skip_env::logging::GRUNTWORK_DEBUG_ENV;
use tempfile::tempdir;

const CLEAN_FILE: &str = r#"
package test

func TestVpc(t *testing.T) {
	// os.Setenv("SKIP_setup", "true")
	deployVpc(t)
}
"#;

const OFFENDING_FILE: &str = r#"
package test

func TestVpc(t *testing.T) {
	os.Setenv("SKIP_setup", "true")
	deployVpc(t)
}
"#;

fn write_go_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

fn run(args: Vec<String>) -> (i32, String) {
    let mut buffer = Vec::new();
    let code = run_with_args_to(args, &mut buffer).unwrap();
    (code, String::from_utf8(buffer).unwrap())
}

#[test]
fn clean_file_exits_zero_with_no_report() {
    let dir = tempdir().unwrap();
    let path = write_go_file(dir.path(), "vpc_test.go", CLEAN_FILE);

    let (code, output) = run(vec![path.to_string_lossy().into_owned()]);
    assert_eq!(code, EXIT_CLEAN);
    assert!(output.is_empty());
}

#[test]
fn offending_file_exits_failed_check_and_is_listed() {
    let dir = tempdir().unwrap();
    let path = write_go_file(dir.path(), "vpc_test.go", OFFENDING_FILE);

    let (code, output) = run(vec![path.to_string_lossy().into_owned()]);
    assert_eq!(code, EXIT_FAILED_CHECK);
    assert!(output.starts_with(FAILURE_HEADER));
    assert!(output.contains(&format!("\t- {}", path.display())));
}

#[test]
fn only_offending_files_are_listed() {
    let dir = tempdir().unwrap();
    let clean = write_go_file(dir.path(), "clean_test.go", CLEAN_FILE);
    let offending = write_go_file(dir.path(), "offending_test.go", OFFENDING_FILE);

    let (code, output) = run(vec![
        clean.to_string_lossy().into_owned(),
        offending.to_string_lossy().into_owned(),
    ]);
    assert_eq!(code, EXIT_FAILED_CHECK);
    assert!(!output.contains("clean_test.go"));
    assert!(output.contains("offending_test.go"));
}

#[test]
fn offender_report_preserves_argument_order() {
    let dir = tempdir().unwrap();
    let first = write_go_file(dir.path(), "a_test.go", OFFENDING_FILE);
    let second = write_go_file(dir.path(), "b_test.go", OFFENDING_FILE);

    let (code, output) = run(vec![
        second.to_string_lossy().into_owned(),
        first.to_string_lossy().into_owned(),
    ]);
    assert_eq!(code, EXIT_FAILED_CHECK);
    let b_at = output.find("b_test.go").unwrap();
    let a_at = output.find("a_test.go").unwrap();
    assert!(b_at < a_at, "report should follow argv order:\n{output}");
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempdir().unwrap();
    let path = write_go_file(dir.path(), "vpc_test.go", OFFENDING_FILE);
    let args = vec![path.to_string_lossy().into_owned()];

    let first = run(args.clone());
    let second = run(args);
    assert_eq!(first, second);
}

#[test]
fn missing_file_is_a_tool_failure() {
    let mut buffer: Vec<u8> = Vec::new();
    let result = run_with_args_to(vec!["/definitely/not/here_test.go".to_owned()], &mut buffer);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to check"));
}

#[test]
fn unparsable_file_is_a_tool_failure() {
    let dir = tempdir().unwrap();
    let path = write_go_file(
        dir.path(),
        "broken_test.go",
        "package test\n\nfunc TestVpc(t *testing.T) {\n\tos.Setenv(\"SKIP_setup\",\n",
    );

    let mut buffer: Vec<u8> = Vec::new();
    let result = run_with_args_to(vec![path.to_string_lossy().into_owned()], &mut buffer);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to check"));
    assert!(format!("{err:#}").contains("syntax errors"));
}

#[test]
fn no_files_is_a_usage_error() {
    let (code, output) = run(vec![]);
    assert_eq!(code, EXIT_USAGE);
    assert!(output.contains("Usage"), "expected usage text:\n{output}");
}

#[test]
fn unknown_log_level_is_a_usage_error() {
    let (code, output) = run(vec![
        "--log-level".to_owned(),
        "loud".to_owned(),
        "whatever_test.go".to_owned(),
    ]);
    assert_eq!(code, EXIT_USAGE);
    assert!(output.contains("loud"));
}

#[test]
fn help_prints_usage_and_exits_clean() {
    let (code, output) = run(vec!["--help".to_owned()]);
    assert_eq!(code, EXIT_CLEAN);
    assert!(output.contains("Usage"));
    assert!(output.contains("--log-level"));
}

#[test]
fn debug_level_sets_gruntwork_debug() {
    let dir = tempdir().unwrap();
    let path = write_go_file(dir.path(), "vpc_test.go", CLEAN_FILE);

    let (code, _) = run(vec![
        "--log-level".to_owned(),
        "debug".to_owned(),
        path.to_string_lossy().into_owned(),
    ]);
    assert_eq!(code, EXIT_CLEAN);
    assert_eq!(std::env::var(GRUNTWORK_DEBUG_ENV).as_deref(), Ok("true"));
}
