//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_babycare"))
        .args(args)
        .env("BABYCARE_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
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

fn birth_date_days_ago(days: i64) -> String {
    (chrono::Utc::now().date_naive() - chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_baby_add_and_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let birth = birth_date_days_ago(10);
    let out = run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth]);
    assert!(out.contains("Baby added:"));
    assert!(out.contains("1 week old"));

    let out = run_ok(dir.path(), &["baby", "list", "--json"]);
    let babies: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(babies.as_array().unwrap().len(), 1);
    assert_eq!(babies[0]["name"], "Nora");
}

#[test]
fn test_future_birth_date_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let birth = birth_date_days_ago(-3);
    let (_, stderr, code) = run_cli(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_log_then_timeline() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(40)]);
    run_ok(
        dir.path(),
        &["log", "feeding", "--start", "-30m", "--end", "-10m", "--method", "bottle", "--amount", "90"],
    );
    run_ok(dir.path(), &["log", "diaper", "--kind", "wet"]);

    let out = run_ok(dir.path(), &["timeline", "--json"]);
    let groups: serde_json::Value = serde_json::from_str(&out).unwrap();
    let activities = groups[0]["activities"].as_array().unwrap();
    assert!(!activities.is_empty());
}

#[test]
fn test_log_rejects_foreign_detail_flags() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(40)]);
    let (_, stderr, code) = run_cli(dir.path(), &["log", "sleep", "--kind", "wet"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("do not apply"));
}

#[test]
fn test_suggest_and_create_reminder() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(62)]);

    let out = run_ok(dir.path(), &["suggest", "--json"]);
    let suggestions: serde_json::Value = serde_json::from_str(&out).unwrap();
    let titles: Vec<&str> = suggestions
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        ["2-Month Milestone Check", "Vitamin D Supplement", "Sleep Tracking Tip"]
    );

    run_ok(dir.path(), &["suggest", "--create", "2"]);
    let out = run_ok(dir.path(), &["reminder", "list", "--json"]);
    let board: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(board["pending"][0]["title"], "Vitamin D Supplement");

    // the open medicine reminder now suppresses the vitamin D nudge
    let out = run_ok(dir.path(), &["suggest", "--json"]);
    assert!(!out.contains("Vitamin D Supplement"));
}

#[test]
fn test_tips_rotate_within_invocation() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(5)]);
    let out = run_ok(dir.path(), &["tips"]);
    assert!(out.contains("Newborn Sleep"));
    assert!(out.contains("Tip 1 of 4"));

    let out = run_ok(dir.path(), &["tips", "--next", "5"]);
    assert!(out.contains("Tip 2 of 4"));
}

#[test]
fn test_reminder_done_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(20)]);
    run_ok(dir.path(), &["reminder", "add", "--type", "feeding", "--at", "-1h"]);

    let out = run_ok(dir.path(), &["reminder", "list", "--json"]);
    let board: serde_json::Value = serde_json::from_str(&out).unwrap();
    let id = board["pending"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(board["pending"][0]["title"], "Feeding Time");

    run_ok(dir.path(), &["reminder", "done", &id]);
    let out = run_ok(dir.path(), &["reminder", "list", "--json"]);
    let board: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(board["completed"][0]["id"], id.as_str());

    run_ok(dir.path(), &["reminder", "remove", &id]);
    let (_, _, code) = run_cli(dir.path(), &["reminder", "done", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_cry_record_and_history() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(20)]);
    let out = run_ok(dir.path(), &["cry", "record", "--need", "hunger", "--confidence", "0.85"]);
    assert!(out.contains("Baby is likely hungry. Consider feeding. (85% confidence)"));

    let (_, _, code) = run_cli(dir.path(), &["cry", "record", "--need", "hunger", "--confidence", "1.5"]);
    assert_eq!(code, 1);

    let out = run_ok(dir.path(), &["cry", "history", "--json"]);
    let history: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn test_stats_today() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(20)]);
    run_ok(dir.path(), &["log", "feeding"]);
    let out = run_ok(dir.path(), &["stats", "today", "--json"]);
    let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["feedings"]["value"], 1);
    assert_eq!(summary["feedings"]["target"], 8);
}

#[test]
fn test_config_get_set_reset() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "suggestions.max_suggestions"]).trim(), "3");

    run_ok(dir.path(), &["config", "set", "suggestions.max_suggestions", "2"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "suggestions.max_suggestions"]).trim(), "2");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "suggestions.bogus", "1"]);
    assert_eq!(code, 1);

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "suggestions.max_suggestions"]).trim(), "3");
}

#[test]
fn test_two_babies_need_explicit_selection() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(20)]);
    run_ok(dir.path(), &["baby", "add", "Ezra", "--birth-date", &birth_date_days_ago(200)]);

    let (_, stderr, code) = run_cli(dir.path(), &["tips"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--baby"));

    let out = run_ok(dir.path(), &["tips", "--baby", "ezra"]);
    assert!(out.contains("Sitting Up"));
}

#[test]
fn test_log_rejects_out_of_range_relative_time() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["baby", "add", "Nora", "--birth-date", &birth_date_days_ago(20)]);
    let (_, stderr, code) = run_cli(dir.path(), &["log", "feeding", "--start", "-100000000d"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of range"));
}
