//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They run
//! against the dev data directory (RECALL_ENV=dev) to stay clear of any
//! real configuration.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "recall-cli", "--"])
        .args(args)
        .env("RECALL_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("review"));
    assert!(stdout.contains("report"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_files_runs() {
    let (_, _, code) = run_cli(&["files"]);
    assert_eq!(code, 0, "files failed");
}

#[test]
fn test_review_missing_base_fails() {
    let (_, stderr, code) = run_cli(&["review", "no-such-base-xyz"]);
    assert!(code != 0, "review of a missing base should fail");
    assert!(stderr.contains("error"), "stderr: {stderr}");
}

#[test]
fn test_report_rejects_unknown_format() {
    let (_, stderr, code) = run_cli(&["report", "no-such-base-xyz", "--format", "pdf"]);
    assert!(code != 0);
    assert!(stderr.contains("error"), "stderr: {stderr}");
}
