//! # gzpipe CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `gzpipe` binary: standard flags, unknown
//! subcommands, and configuration errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    gzpipe_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compress"))
        .stdout(predicate::str::contains("decompress"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn test_version() {
    gzpipe_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    gzpipe_cmd().assert().failure();
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = Sandbox::with_config("[compression]\nlevel = 42\n");
    sandbox.write("a.txt", "data");
    sandbox
        .cmd()
        .args(["compress", "a.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid compression level"));
    assert_eq!(sandbox.listing(), vec!["a.txt"]);
}

#[test]
fn test_unknown_config_field_is_reported() {
    let sandbox = Sandbox::with_config("[naming]\nretries = 3\n");
    sandbox
        .cmd()
        .args(["resolve", ".", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse TOML"));
}
