//! Common test utilities for fump CLI tests

#![allow(dead_code)]
#![allow(deprecated)]

use assert_cmd::Command;
use std::path::PathBuf;

/// Get a Command configured to run the fump binary
pub fn fump_cmd() -> Command {
    Command::cargo_bin("fump").unwrap()
}

/// Get the path to the test fixtures directory
pub fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_path().join(name)
}
