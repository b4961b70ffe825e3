//! CLI end-to-end tests.
//!
//! Each test invokes the binary via `cargo run` with STUDYROOM_DATA_DIR
//! pointed at its own tempdir, so nothing touches the real data directory
//! and tests stay independent.

use std::path::Path;
use std::process::Command;

fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "studyroom-cli", "--"])
        .args(args)
        .env("STUDYROOM_DATA_DIR", data_dir)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

#[test]
fn config_list_shows_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["config", "list"]);
    let settings: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(settings["study"], 25);
    assert_eq!(settings["short"], 5);
    assert_eq!(settings["long"], 15);
}

#[test]
fn timer_status_starts_idle_in_study() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["mode"], "study");
    assert_eq!(snapshot["remaining_seconds"], 25 * 60);
    assert_eq!(snapshot["running"], false);
    assert_eq!(snapshot["display"], "25:00");
}

#[test]
fn timer_mode_switch_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["timer", "mode", "short"]);
    let stdout = run_ok(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["mode"], "short");
    assert_eq!(snapshot["total_seconds"], 5 * 60);
}

#[test]
fn timer_rejects_bogus_mode() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["timer", "mode", "bogus"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown mode"), "stderr: {stderr}");
    // State is untouched.
    let stdout = run_ok(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["mode"], "study");
}

#[test]
fn config_set_resets_the_timer_duration() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "study", "50"]);
    let stdout = run_ok(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["total_seconds"], 50 * 60);
}

#[test]
fn goal_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["goal", "add", "read chapter 4"]);
    run_ok(dir.path(), &["goal", "add", "flashcards", "--category", "Revision"]);
    run_ok(dir.path(), &["goal", "done", "0"]);

    let stdout = run_ok(dir.path(), &["goal", "list"]);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list["done"], 1);
    assert_eq!(list["total"], 2);
    assert_eq!(list["goals"][1]["category"], "Revision");

    run_ok(dir.path(), &["goal", "clear-done"]);
    let stdout = run_ok(dir.path(), &["goal", "list"]);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list["total"], 1);
    assert_eq!(list["goals"][0]["text"], "flashcards");
}

#[test]
fn stats_streak_initializes_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["stats", "streak"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["streak"], 0);
}

#[test]
fn data_export_then_import_carries_notes() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["notes", "set", "exam on friday"]);
    let export_path = dir.path().join("bundle.json");
    run_ok(dir.path(), &["data", "export", export_path.to_str().unwrap()]);

    let other = tempfile::tempdir().unwrap();
    run_ok(other.path(), &["data", "import", export_path.to_str().unwrap()]);
    let stdout = run_ok(other.path(), &["notes", "show"]);
    assert_eq!(stdout.trim(), "exam on friday");
}

#[test]
fn data_import_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "definitely not json").unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["data", "import", bad.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid file"), "stderr: {stderr}");
}

#[test]
fn quote_prints_something() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["quote"]);
    assert!(!stdout.trim().is_empty());
}
