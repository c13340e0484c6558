//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return output.
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyhub"))
        .args(args)
        .env("STUDYHUB_DATA_DIR", data_dir)
        .env_remove("STUDYHUB_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn list_json(data_dir: &Path) -> Vec<serde_json::Value> {
    let stdout = run_ok(data_dir, &["task", "list", "--json"]);
    serde_json::from_str(&stdout).expect("task list --json is not JSON")
}

#[test]
fn test_task_add_and_list() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(
        dir.path(),
        &["task", "add", "Read ch.3", "--category", "homework", "--due", "2025-01-10"],
    );
    assert!(out.contains("Task added!"));

    let tasks = list_json(dir.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["position"], 1);
    assert_eq!(tasks[0]["text"], "Read ch.3");
    assert_eq!(tasks[0]["category"], "Homework");
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["dueDate"], "2025-01-10");

    let text = run_ok(dir.path(), &["task", "list"]);
    assert!(text.contains("1. [ ] Read ch.3  (Homework, due 2025-01-10)"));
}

#[test]
fn test_task_toggle_and_filter() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["task", "add", "one"]);
    run_ok(dir.path(), &["task", "add", "two"]);
    let out = run_ok(dir.path(), &["task", "toggle", "2"]);
    assert!(out.contains("Task completed!"));

    let done = run_ok(dir.path(), &["task", "list", "--filter", "completed", "--json"]);
    let done: Vec<serde_json::Value> = serde_json::from_str(&done).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0]["text"], "two");
    assert_eq!(done[0]["position"], 2);
}

#[test]
fn test_task_move_sort_and_nudge() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["task", "add", "undated"]);
    run_ok(dir.path(), &["task", "add", "late", "--due", "2025-03-01"]);
    run_ok(dir.path(), &["task", "add", "early", "--due", "2025-01-01"]);

    run_ok(dir.path(), &["task", "sort"]);
    let order: Vec<_> = list_json(dir.path())
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["early", "late", "undated"]);

    run_ok(dir.path(), &["task", "move", "3", "1"]);
    let out = run_ok(dir.path(), &["task", "nudge", "1", "up"]);
    assert!(out.contains("edge of the list"));
    run_ok(dir.path(), &["task", "nudge", "1", "down"]);

    let order: Vec<_> = list_json(dir.path())
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["early", "undated", "late"]);
}

#[test]
fn test_invalid_input_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: task text cannot be empty"));

    let (_, stderr, code) = run_cli(dir.path(), &["task", "toggle", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no task at position 1"));

    let (_, stderr, code) = run_cli(dir.path(), &["task", "clear"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--yes"));
}

#[test]
fn test_goal_lifecycle() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["goal", "add", "Finish essay"]);
    run_ok(dir.path(), &["goal", "add", "Sleep 8h"]);
    let out = run_ok(dir.path(), &["goal", "done", "1"]);
    assert!(out.contains("Goal completed."));

    let goals: Vec<serde_json::Value> =
        serde_json::from_str(&run_ok(dir.path(), &["goal", "list", "--json"])).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["text"], "Sleep 8h");

    run_ok(dir.path(), &["goal", "clear", "--yes"]);
    assert!(run_ok(dir.path(), &["goal", "list"]).contains("No goals."));
}

#[test]
fn test_timer_run_logs_a_session() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["timer", "run", "--minutes", "1", "--tick-ms", "1"]);
    assert!(out.contains("Break over! Back to work."));

    assert_eq!(run_ok(dir.path(), &["log", "count"]).trim(), "1");

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&run_ok(dir.path(), &["log", "show", "--json"])).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["duration"], 1);

    let export = dir.path().join("sessions.txt");
    run_ok(dir.path(), &["log", "export", "--out", export.to_str().unwrap()]);
    let text = std::fs::read_to_string(&export).unwrap();
    assert!(text.ends_with(": 1 minutes\n"));
}

#[test]
fn test_theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_ok(dir.path(), &["theme", "get"]).trim(), "light");
    assert_eq!(run_ok(dir.path(), &["theme", "toggle"]).trim(), "dark");
    assert_eq!(run_ok(dir.path(), &["theme", "get"]).trim(), "dark");
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "timer.default_minutes"]).trim(),
        "25"
    );
    run_ok(dir.path(), &["config", "set", "timer.default_minutes", "50"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "timer.default_minutes"]).trim(),
        "50"
    );

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "timer.default_minutes"]).trim(),
        "25"
    );
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["completions", "bash"]);
    assert!(out.contains("studyhub"));
}
