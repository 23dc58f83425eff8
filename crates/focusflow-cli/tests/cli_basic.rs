//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusflow-cli", "--"])
        .args(args)
        .env("FOCUSFLOW_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Tests share one dev store and may run in parallel, so each test looks up
/// the task it created by name rather than trusting list order.
fn task_id_by_name(name: &str) -> Option<String> {
    let (stdout, _, code) = run_cli(&["task", "list", "--json"]);
    if code != 0 {
        return None;
    }
    let parsed: serde_json::Value = serde_json::from_str(&stdout).ok()?;
    parsed
        .as_array()?
        .iter()
        .find(|t| t["name"] == name)
        .and_then(|t| t["id"].as_str())
        .map(|id| id.to_string())
}

#[test]
fn test_task_add() {
    let (stdout, _, code) = run_cli(&["task", "add", "Test Task", "--duration", "30"]);
    assert_eq!(code, 0, "task add failed");
    assert!(stdout.contains("TaskAdded"));
}

#[test]
fn test_task_add_rejects_empty_name() {
    let (_, stderr, code) = run_cli(&["task", "add", "  "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("name"));
}

#[test]
fn test_task_add_pomodoro() {
    let (stdout, _, code) = run_cli(&[
        "task", "add", "Pomodoro Task", "--pomodoro", "--focus", "25", "--break", "5",
    ]);
    assert_eq!(code, 0, "pomodoro task add failed");
    assert!(stdout.contains("TaskAdded"));
}

#[test]
fn test_task_list() {
    let _ = run_cli(&["task", "add", "List Test"]);
    let (_, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "task list failed");
}

#[test]
fn test_task_list_json() {
    let _ = run_cli(&["task", "add", "List JSON Test"]);
    let (stdout, _, code) = run_cli(&["task", "list", "--json"]);
    assert_eq!(code, 0, "task list --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_task_reset() {
    let _ = run_cli(&["task", "add", "Reset Test"]);
    if let Some(id) = task_id_by_name("Reset Test") {
        let (stdout, _, code) = run_cli(&["task", "reset", &id]);
        assert_eq!(code, 0, "task reset failed");
        assert!(stdout.contains("TimerReset"));
    }
}

#[test]
fn test_task_delete() {
    let _ = run_cli(&["task", "add", "Delete Test"]);
    if let Some(id) = task_id_by_name("Delete Test") {
        let (stdout, _, code) = run_cli(&["task", "delete", &id]);
        assert_eq!(code, 0, "task delete failed");
        assert!(stdout.contains("TaskDeleted"));
    }
}

#[test]
fn test_task_complete_before_goal_fails() {
    let _ = run_cli(&["task", "add", "Complete Too Early", "--duration", "60"]);
    if let Some(id) = task_id_by_name("Complete Too Early") {
        // A fresh task has never ticked, so its goal cannot be reached.
        let (_, _, code) = run_cli(&["task", "complete", &id]);
        assert_ne!(code, 0, "completing an unreached goal should fail");
    }
}

#[test]
fn test_timer_toggle() {
    let _ = run_cli(&["task", "add", "Toggle Test"]);
    if let Some(id) = task_id_by_name("Toggle Test") {
        let (stdout, _, code) = run_cli(&["timer", "toggle", &id]);
        assert_eq!(code, 0, "timer toggle failed");
        // Each invocation reloads with every timer paused, so a standalone
        // toggle always reports a start.
        assert!(stdout.contains("TimerStarted"));
    }
}

#[test]
fn test_timer_toggle_unknown_id_fails() {
    let (_, stderr, code) = run_cli(&["timer", "toggle", "no-such-task"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No task"));
}

#[test]
fn test_timer_status_leaves_store_untouched() {
    let _ = run_cli(&["task", "add", "Status Check"]);
    if let Some(id) = task_id_by_name("Status Check") {
        let (_, _, code) = run_cli(&["timer", "status"]);
        assert_eq!(code, 0, "timer status failed");
        // The record survives the read-only query unchanged.
        assert_eq!(task_id_by_name("Status Check"), Some(id));
    }
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_goal_show() {
    let (stdout, _, code) = run_cli(&["goal", "show"]);
    assert_eq!(code, 0, "goal show failed");
    assert!(stdout.contains('%'));
}

#[test]
fn test_goal_set() {
    let (_, _, code) = run_cli(&["goal", "set", "240"]);
    assert_eq!(code, 0, "goal set failed");
}

#[test]
fn test_goal_set_zero_fails() {
    let (_, _, code) = run_cli(&["goal", "set", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_pomodoro_show() {
    let (stdout, _, code) = run_cli(&["pomodoro", "show"]);
    assert_eq!(code, 0, "pomodoro show failed");
    assert!(stdout.contains("focus_minutes"));
}

#[test]
fn test_pomodoro_set() {
    let (stdout, _, code) = run_cli(&["pomodoro", "set", "--focus", "25", "--break", "5"]);
    assert_eq!(code, 0, "pomodoro set failed");
    assert!(stdout.contains("25min focus"));
}

#[test]
fn test_stats_show() {
    let (stdout, _, code) = run_cli(&["stats", "show"]);
    assert_eq!(code, 0, "stats show failed");
    assert!(stdout.contains("Total focus time"));
}

#[test]
fn test_stats_show_json() {
    let (stdout, _, code) = run_cli(&["stats", "show", "--json"]);
    assert_eq!(code, 0, "stats show --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed["total_elapsed_seconds"].is_u64());
}
