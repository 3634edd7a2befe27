//! Tests for the binary's argument surface: help text, version output,
//! and clap-level rejection of invalid flag combinations.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("skillgraph").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_subcommand_help_shows_options() {
    let mut cmd = Command::cargo_bin("skillgraph").unwrap();
    cmd.arg("check").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("skillgraph").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let mut cmd = Command::cargo_bin("skillgraph").unwrap();
    cmd.arg("--verbose").arg("--quiet").arg("check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_format_value_rejected() {
    let mut cmd = Command::cargo_bin("skillgraph").unwrap();
    cmd.arg("check").arg(".").arg("--format").arg("yaml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("--format"));
}

#[test]
fn test_missing_subcommand_shows_usage() {
    let mut cmd = Command::cargo_bin("skillgraph").unwrap();

    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}
