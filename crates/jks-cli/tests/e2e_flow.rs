//! End-to-end tests for the `jks` binary.
//!
//! Runs the built binary against temporary agenda and config files.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const AGENDA: &str = r#"{
    "tasks": [
        {"id": 1, "quick_title": "Write report"},
        {"id": 2, "quick_title": "Review"}
    ],
    "activities": [
        {"id": 1, "task_id": 1, "time_start": "2024-05-06T09:00:00Z", "time_end": "2024-05-06T10:00:00Z"},
        {"id": 2, "task_id": 2, "time_start": "2024-05-06T10:00:00Z", "time_end": "2024-05-06T10:30:00Z"}
    ],
    "plans": [
        {"id": 1, "task_id": 1, "time_at_after": "2024-05-06T09:30:00Z", "time_before": "2024-05-06T11:00:00Z"}
    ]
}"#;

fn jks_binary() -> String {
    env!("CARGO_BIN_EXE_jks").to_string()
}

/// A command isolated from the user's config, data dir and time zone.
fn jks(home: &Path) -> Command {
    let mut cmd = Command::new(jks_binary());
    cmd.env("HOME", home)
        .env("TZ", "UTC")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("JKS_AGENDA_PATH")
        .env_remove("JKS_MIN_DURATION_SECS")
        .env_remove("JKS_SLOT_MINUTES")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn jks");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for jks")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "jks failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_layout_from_stdin() {
    let temp = TempDir::new().unwrap();
    let mut cmd = jks(temp.path());
    cmd.arg("layout");

    let input = r#"[{"start":0,"duration":1},{"start":1,"duration":2},{"start":2,"duration":2},{"start":3,"duration":1}]"#;
    let output = run_with_stdin(cmd, input);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), r#"{"column_count":2,"columns":[0,0,1,0]}"#);
}

#[test]
fn test_layout_min_duration_flag() {
    let temp = TempDir::new().unwrap();
    let mut cmd = jks(temp.path());
    cmd.args(["layout", "-", "--min-duration", "5s"]);

    let output = run_with_stdin(cmd, r#"[{"start":0,"duration":1},{"start":1,"duration":1}]"#);
    assert_success(&output);

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["column_count"], 2);
    assert_eq!(result["columns"], serde_json::json!([0, 1]));
}

#[test]
fn test_layout_rejects_bad_input() {
    let temp = TempDir::new().unwrap();
    let mut cmd = jks(temp.path());
    cmd.arg("layout");

    let output = run_with_stdin(cmd, "not json");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid input"), "stderr: {stderr}");
}

#[test]
fn test_day_json_from_file() {
    let temp = TempDir::new().unwrap();
    let agenda_path = temp.path().join("agenda.json");
    std::fs::write(&agenda_path, AGENDA).unwrap();

    let output = jks(temp.path())
        .arg("day")
        .arg(&agenda_path)
        .args(["--date", "2024-05-06", "--min-duration", "0", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["column_count"], 2);
    let blocks = view["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    let columns: Vec<_> = blocks.iter().map(|b| b["column"].as_u64().unwrap()).collect();
    assert_eq!(columns, vec![0, 0, 1]);
}

#[test]
fn test_day_uses_configured_agenda() {
    let temp = TempDir::new().unwrap();
    let agenda_path = temp.path().join("my-agenda.json");
    std::fs::write(&agenda_path, AGENDA).unwrap();

    let config_path = temp.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "agenda_path = {:?}\nslot_minutes = 60\n",
            agenda_path.to_string_lossy()
        ),
    )
    .unwrap();

    let output = jks(temp.path())
        .arg("--config")
        .arg(&config_path)
        .args(["day", "--date", "2024-05-06"])
        .output()
        .unwrap();
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("2024-05-06 Mon: 3 entries"), "stdout: {stdout}");
    assert!(stdout.contains("09:00 |ap"), "stdout: {stdout}");
    assert!(stdout.contains("10:00 |ap"), "stdout: {stdout}");
}

#[test]
fn test_day_missing_agenda_fails() {
    let temp = TempDir::new().unwrap();

    let output = jks(temp.path())
        .args(["day", "--date", "2024-05-06"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {stderr}");
}

#[test]
fn test_day_rejects_bad_date() {
    let temp = TempDir::new().unwrap();
    let agenda_path = temp.path().join("agenda.json");
    std::fs::write(&agenda_path, AGENDA).unwrap();

    let output = jks(temp.path())
        .arg("day")
        .arg(&agenda_path)
        .args(["--date", "next week"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
