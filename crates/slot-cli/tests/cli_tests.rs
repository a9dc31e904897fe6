//! Integration tests for the `slotfind` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to drive the schedule and
//! availability subcommands against a JSON fixture, including config files,
//! write-back and invalid-request handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the team.json fixture.
fn team_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/team.json")
}

/// Helper: path to the early_hours.toml fixture.
fn early_hours_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/early_hours.toml")
}

/// Helper: a `slotfind` command with the business-hours env overrides cleared.
fn slotfind() -> Command {
    let mut cmd = Command::cargo_bin("slotfind").unwrap();
    cmd.env_remove("SLOTFIND_DAY_START")
        .env_remove("SLOTFIND_DAY_END")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// schedule
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn schedule_books_after_merged_meetings() {
    // alice 09:00-10:00 and bob 09:30-11:00 merge to 09:00-11:00.
    let output = slotfind()
        .args([
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "alice,bob",
            "--duration",
            "60",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["meeting"]["interval"]["start"], "2026-03-02T11:00:00Z");
    assert_eq!(body["meeting"]["interval"]["end"], "2026-03-02T12:00:00Z");
    assert_eq!(body["meeting"]["id"], 3);
    assert_eq!(body["meeting"]["participant_ids"], serde_json::json!(["alice", "bob"]));
}

#[test]
fn schedule_reports_no_slot() {
    slotfind()
        .args([
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "alice",
            "--duration",
            "600",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"no_slot\""));
}

#[test]
fn schedule_unknown_participant_exits_with_invalid_request() {
    slotfind()
        .args([
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "alice,mallory",
            "--duration",
            "30",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("invalid_request"))
        .stdout(predicate::str::contains("mallory"));
}

#[test]
fn schedule_inverted_window_exits_with_invalid_request() {
    slotfind()
        .args([
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "alice",
            "--duration",
            "30",
            "--earliest",
            "2026-03-02T17:00:00Z",
            "--latest",
            "2026-03-02T09:00:00Z",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Invalid time window"));
}

#[test]
fn schedule_honours_config_file() {
    let output = slotfind()
        .args([
            "--config",
            early_hours_path(),
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "carol",
            "--duration",
            "60",
            "--earliest",
            "2026-03-02T06:00:00Z",
            "--latest",
            "2026-03-02T12:00:00Z",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["meeting"]["interval"]["start"], "2026-03-02T07:00:00Z");
}

#[test]
fn schedule_honours_env_override() {
    let output = slotfind()
        .env("SLOTFIND_DAY_START", "13:00")
        .args([
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "alice",
            "--duration",
            "30",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["meeting"]["interval"]["start"],
        "2026-03-02T13:00:00Z"
    );
}

#[test]
fn schedule_write_persists_meeting() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("team.json");
    std::fs::copy(team_json_path(), &data).unwrap();
    let data_arg = data.to_str().unwrap();

    let args = |who: &'static str| {
        [
            "schedule",
            "--data",
            data_arg,
            "--participants",
            who,
            "--duration",
            "60",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
            "--write",
        ]
    };

    slotfind().args(args("carol")).assert().success();
    // carol is now busy 09:30-12:00 (11:00-12:00 newly booked).
    let output = slotfind().args(args("carol")).output().unwrap();
    assert_eq!(
        stdout_json(&output)["meeting"]["interval"]["start"],
        "2026-03-02T12:00:00Z"
    );

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(saved["meetings"].as_array().unwrap().len(), 4);
}

#[test]
fn schedule_missing_data_file_fails() {
    slotfind()
        .args([
            "schedule",
            "--data",
            "/nonexistent/team.json",
            "--participants",
            "alice",
            "--duration",
            "30",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read data file"));
}

#[test]
fn schedule_rejects_malformed_timestamp() {
    slotfind()
        .args([
            "schedule",
            "--data",
            team_json_path(),
            "--participants",
            "alice",
            "--duration",
            "30",
            "--earliest",
            "tomorrow",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// availability
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn availability_lists_busy_and_free() {
    let output = slotfind()
        .args([
            "availability",
            "--data",
            team_json_path(),
            "--participants",
            "alice,carol",
            "--earliest",
            "2026-03-02T09:00:00Z",
            "--latest",
            "2026-03-02T17:00:00Z",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body = stdout_json(&output);
    assert_eq!(body["busy"].as_array().unwrap().len(), 1);
    assert_eq!(body["busy"][0]["end"], "2026-03-02T11:00:00Z");
    assert_eq!(body["free"][0]["start"], "2026-03-02T11:00:00Z");
    assert_eq!(body["free"][0]["end"], "2026-03-02T17:00:00Z");
}

// ─────────────────────────────────────────────────────────────────────────────
// Help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    slotfind()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("schedule"))
        .stdout(predicate::str::contains("availability"));
}
