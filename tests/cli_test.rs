//! Binary-level tests for the roundtable CLI
//!
//! These tests run the compiled binary. Backend calls go to a reserved
//! local port where nothing listens, so they exercise the failure paths
//! without a network.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
mod common;

const UNREACHABLE: &str = "http://127.0.0.1:1/api";

fn roundtable() -> Command {
    let mut cmd = Command::cargo_bin("roundtable").unwrap();
    cmd.env_remove("ROUNDTABLE_BASE_URL")
        .env_remove("ROUNDTABLE_TIMEOUT_SECONDS")
        .env_remove("ROUNDTABLE_MAX_ROUNDS")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    roundtable()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("context"))
        .stdout(predicate::str::contains("discuss"));
}

#[test]
fn test_context_failure_prints_marker_and_succeeds() {
    let (_temp_dir, config_path) = common::temp_config_file("backend:\n  timeout_seconds: 2\n");

    roundtable()
        .arg("--config")
        .arg(config_path)
        .arg("--base-url")
        .arg(UNREACHABLE)
        .arg("context")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to fetch context"));
}

#[test]
fn test_send_failure_is_reported_in_timeline() {
    let (_temp_dir, config_path) = common::temp_config_file("backend:\n  timeout_seconds: 2\n");

    roundtable()
        .arg("--config")
        .arg(config_path)
        .arg("--base-url")
        .arg(UNREACHABLE)
        .arg("send")
        .arg("hello")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sender\": \"user\""))
        .stdout(predicate::str::contains("\"sender\": \"system\""));
}

#[test]
fn test_blank_message_is_rejected() {
    roundtable()
        .arg("--base-url")
        .arg(UNREACHABLE)
        .arg("send")
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input: message not sent: input is empty"));
}

#[test]
fn test_discuss_rounds_out_of_range_is_rejected() {
    for rounds in ["0", "21"] {
        roundtable()
            .arg("--base-url")
            .arg(UNREACHABLE)
            .arg("discuss")
            .arg("remote work")
            .arg("--rounds")
            .arg(rounds)
            .assert()
            .failure()
            .stderr(predicate::str::contains("--rounds"));
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_temp_dir, config_path) =
        common::temp_config_file("chat:\n  default_max_rounds: 0\n");

    roundtable()
        .arg("--config")
        .arg(config_path)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be greater than 0"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    roundtable()
        .arg("--base-url")
        .arg("not a url")
        .arg("context")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid backend.base_url"));
}
