//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the participants, find and
//! free subcommands through the actual binary, covering file and stdin input,
//! JSON output, config overrides and both invalid-record policies.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the reference calendar fixture.
fn calendar_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/calendar.csv")
}

fn calendar_csv() -> String {
    std::fs::read_to_string(calendar_path()).expect("calendar.csv fixture must exist")
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// participants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn participants_lists_sorted_names() {
    slots()
        .args(["participants", "-i", calendar_path()])
        .assert()
        .success()
        .stdout("Alice\nBob\nJack\n");
}

#[test]
fn participants_json() {
    let output = slots()
        .args(["participants", "-i", calendar_path(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names, vec!["Alice", "Bob", "Jack"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// find
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn find_one_hour_for_three_people() {
    slots()
        .args(["find", "-i", calendar_path(), "-p", "Alice,Jack,Bob", "-d", "60"])
        .assert()
        .success()
        .stdout("07:00\n11:30\n15:00\n17:00\n");
}

#[test]
fn find_reads_stdin_when_no_input_given() {
    slots()
        .args(["find", "-p", "Alice,Jack,Bob", "-d", "100"])
        .write_stdin(calendar_csv())
        .assert()
        .success()
        .stdout("17:00\n");
}

#[test]
fn find_json_output() {
    let output = slots()
        .args([
            "find",
            "-i",
            calendar_path(),
            "-p",
            "Alice,Jack,Bob",
            "-d",
            "60",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let times: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(times, vec!["07:00", "11:30", "15:00", "17:00"]);
}

#[test]
fn find_ignores_unknown_and_blank_names() {
    slots()
        .args(["find", "-i", calendar_path(), "-p", "Alice,,Nobody", "-d", "60"])
        .assert()
        .success()
        .stdout("07:00\n09:30\n10:30\n11:30\n14:00\n15:00\n17:00\n");
}

#[test]
fn find_with_only_unknown_names_prints_nothing() {
    slots()
        .args(["find", "-i", calendar_path(), "-p", "Nobody", "-d", "30"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn find_with_non_positive_duration_prints_nothing() {
    slots()
        .args(["find", "-i", calendar_path(), "-p", "Alice", "-d", "0"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    slots()
        .args(["find", "-i", calendar_path(), "-p", "Alice", "-d", "-15"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn find_requires_participants() {
    slots()
        .args(["find", "-i", calendar_path(), "-d", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--participants"));
}

#[test]
fn find_with_custom_workday() {
    slots()
        .args([
            "find",
            "-i",
            calendar_path(),
            "-p",
            "Alice,Jack,Bob",
            "-d",
            "20",
            "--day-start",
            "09:00",
            "--day-end",
            "13:00",
        ])
        .assert()
        .success()
        .stdout("09:40\n11:30\n11:50\n12:10\n12:30\n");
}

#[test]
fn find_reads_workday_from_config_file() {
    let config_path = std::env::temp_dir().join("slots-test-config.toml");
    std::fs::write(&config_path, "[workday]\nstart = \"17:00\"\nend = \"19:00\"\n").unwrap();

    slots()
        .args(["find", "-i", calendar_path(), "-p", "Alice", "-d", "45"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout("17:00\n17:45\n");

    let _ = std::fs::remove_file(&config_path);
}

#[test]
fn inverted_workday_is_rejected() {
    slots()
        .args([
            "find",
            "-i",
            calendar_path(),
            "-p",
            "Alice",
            "-d",
            "30",
            "--day-start",
            "18:00",
            "--day-end",
            "08:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workday window"));
}

#[test]
fn bad_day_start_is_rejected() {
    slots()
        .args(["find", "-i", calendar_path(), "-p", "Alice", "-d", "30"])
        .args(["--day-start", "nine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --day-start 'nine'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_lists_joint_runs() {
    slots()
        .args(["free", "-i", calendar_path(), "-p", "Alice,Jack,Bob"])
        .assert()
        .success()
        .stdout(
            "07:00-08:00 (60 min)\n\
             09:40-10:00 (20 min)\n\
             11:30-13:00 (90 min)\n\
             15:00-16:00 (60 min)\n\
             17:00-19:00 (120 min)\n",
        );
}

#[test]
fn free_json_output() {
    let output = slots()
        .args(["free", "-i", calendar_path(), "-p", "Bob", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let runs: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(runs.len(), 5);
    assert_eq!(runs[1]["start"], "09:40");
    assert_eq!(runs[1]["end"], "10:00");
    assert_eq!(runs[1]["duration_minutes"], 20);
}

// ─────────────────────────────────────────────────────────────────────────────
// Invalid records
// ─────────────────────────────────────────────────────────────────────────────

const WITH_BAD_RECORD: &str = "Alice,Standup,08:00,09:00\nAlice,Broken,nine,10:00\n";

#[test]
fn invalid_records_are_skipped_with_warning() {
    slots()
        .args(["find", "-p", "Alice", "-d", "60", "--day-start", "07:00", "--day-end", "10:00"])
        .write_stdin(WITH_BAD_RECORD)
        .assert()
        .success()
        .stdout("07:00\n")
        .stderr(predicate::str::contains("skipping invalid record"));
}

#[test]
fn strict_mode_fails_on_invalid_record() {
    slots()
        .args(["find", "-p", "Alice", "-d", "60", "--strict"])
        .write_stdin(WITH_BAD_RECORD)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load calendar"));
}

#[test]
fn missing_input_file_fails() {
    slots()
        .args(["participants", "-i", "/nonexistent/calendar.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
