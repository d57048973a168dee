//! E2E tests for the fump binary
//!
//! These tests invoke the compiled binary as a subprocess and verify
//! log output, usage errors and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixture;
use common::fump_cmd;
use fump::exit_codes;
use predicates::prelude::*;

#[test]
fn test_positional_only_logs_bare_message() {
    fump_cmd()
        .arg("hello")
        .assert()
        .success()
        .stdout("")
        .stderr("Did something...\n");
}

#[test]
fn test_debug_enables_level_format() {
    fump_cmd()
        .args(["--debug", "hello"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG - starting work"))
        .stderr(predicate::str::contains("fix_arg=\"hello\""))
        .stderr(predicate::str::contains("INFO - Did something...\n"));
}

#[test]
fn test_missing_log_cfg_aborts_with_code_3() {
    let dir = tempfile::tempdir().unwrap();
    fump_cmd()
        .current_dir(dir.path())
        .args(["--log_cfg", "missing.ini", "hello"])
        .assert()
        .code(exit_codes::ABORT)
        .stderr(predicate::str::starts_with("Abort, rc=3\n"))
        .stderr(predicate::str::contains("failed to initialize logging"))
        .stderr(predicate::str::contains("missing.ini"))
        .stderr(predicate::str::contains("Did something").not());
}

#[test]
fn test_malformed_log_cfg_aborts_with_code_3() {
    fump_cmd()
        .arg("--log_cfg")
        .arg(fixture("malformed.ini"))
        .arg("hello")
        .assert()
        .code(exit_codes::ABORT)
        .stderr(predicate::str::contains("Abort, rc=3"))
        .stderr(predicate::str::contains("invalid log configuration"));
}

#[test]
fn test_empty_log_cfg_uses_default_logging() {
    fump_cmd()
        .args(["--log_cfg", "", "hello"])
        .assert()
        .success()
        .stderr("Did something...\n");
}

#[test]
fn test_debug_and_log_cfg_are_mutually_exclusive() {
    fump_cmd()
        .arg("--debug")
        .arg("--log_cfg")
        .arg(fixture("level_format.ini"))
        .arg("hello")
        .assert()
        .code(exit_codes::USAGE)
        .stdout("")
        .stderr(predicate::str::contains("cannot be used with"))
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("Did something").not())
        .stderr(predicate::str::contains("Abort").not());
}

#[test]
fn test_missing_positional_is_usage_error() {
    fump_cmd()
        .assert()
        .code(exit_codes::USAGE)
        .stderr(predicate::str::contains("FIX_ARG"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    fump_cmd()
        .args(["--verbose", "hello"])
        .assert()
        .code(exit_codes::USAGE)
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_help_output() {
    fump_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skeleton for a command-line program"))
        .stdout(predicate::str::contains("<FIX_ARG>"))
        .stdout(predicate::str::contains("--debug"))
        .stdout(predicate::str::contains("--log_cfg <PATH>"))
        .stdout(predicate::str::contains("EXIT CODES:"));
}

#[test]
fn test_version_output() {
    fump_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_log_cfg_level_format() {
    fump_cmd()
        .arg("--log_cfg")
        .arg(fixture("level_format.ini"))
        .arg("hello")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG - starting work"))
        .stderr(predicate::str::contains("INFO - Did something...\n"));
}

#[test]
fn test_log_cfg_stdout_stream_and_level() {
    fump_cmd()
        .arg("--log_cfg")
        .arg(fixture("stdout_warnings.ini"))
        .arg("hello")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn test_log_cfg_file_handler() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("fump.log");
    let cfg_path = dir.path().join("logging.ini");
    std::fs::write(
        &cfg_path,
        format!(
            "[handler]\nfile = {:?}\n\n[formatter]\nformat = \"level\"\n",
            log_path.display().to_string()
        ),
    )
    .unwrap();

    fump_cmd()
        .arg("--log_cfg")
        .arg(&cfg_path)
        .arg("hello")
        .assert()
        .success()
        .stderr("");

    let logged = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(logged, "INFO - Did something...\n");
}

#[test]
fn test_log_cfg_json_format() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("logging.ini");
    std::fs::write(&cfg_path, "[formatter]\nformat = \"json\"\n").unwrap();

    let output = fump_cmd()
        .arg("--log_cfg")
        .arg(&cfg_path)
        .arg("hello")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let record: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["fields"]["message"], "Did something...");
}
