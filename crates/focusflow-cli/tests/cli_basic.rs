//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and a
//! scripted stdin, then check what the shell printed.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command with `input` on stdin and return (stdout, stderr, code).
fn run_cli(config_dir: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    run_cli_logged(config_dir, args, input, None)
}

fn run_cli_logged(
    config_dir: &Path,
    args: &[&str],
    input: &str,
    log_filter: Option<&str>,
) -> (String, String, i32) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_focusflow-cli"));
    command
        .args(args)
        .env("FOCUSFLOW_CONFIG_DIR", config_dir)
        .env_remove("FOCUSFLOW_LOG");
    if let Some(filter) = log_filter {
        command.env("FOCUSFLOW_LOG", filter);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("CLI did not finish");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_start_requires_a_task() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["run"], "start\nquit\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("! Add at least one task before starting the timer"));
}

#[test]
fn test_add_start_pause_status() {
    let dir = tempfile::tempdir().unwrap();
    let script = "add 2 Write report\nstart\npause\nstatus\ntasks\nquit\n";
    let (stdout, _, code) = run_cli(dir.path(), &["run"], script);
    assert_eq!(code, 0, "run failed: {stdout}");
    assert!(stdout.contains("Added #1 Write report (estimate 2)"));
    assert!(stdout.contains("Started Work Session (25:00 left) on #1 Write report"));
    assert!(stdout.contains("Distraction recorded: focus 95% (1 total)"));
    assert!(stdout.contains("Focus: 95% (Good)"));
    assert!(stdout.contains("* #1 [ ] Write report  0/2 (0%)"));
}

#[test]
fn test_validation_messages() {
    let dir = tempfile::tempdir().unwrap();
    let script = "add\nadd 1 Only task\nedit 1 1 \nselect 9\nlaunch\n";
    let (stdout, _, code) = run_cli(dir.path(), &["run"], script);
    assert_eq!(code, 0);
    assert!(stdout.contains("! Task name cannot be empty"));
    assert!(stdout.contains("! Task 9 not found"));
    assert!(stdout.contains("? unknown command: launch"));
}

#[test]
fn test_work_phase_completes_on_the_clock() {
    let dir = tempfile::tempdir().unwrap();
    let script = "add 1 Quick task\nstart\nwait 60\ntasks\nquit\n";
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["run", "--work", "1", "--break", "1", "--tick-ms", "1", "--quiet"],
        script,
    );
    assert_eq!(code, 0, "run failed: {stdout}");
    assert!(stdout.contains("Work Session complete -> Break Time (01:00)"));
    assert!(stdout.contains("#1 progress 1/1 - completed!"));
    assert!(stdout.contains("#1 [x] Quick task  1/1 (100%)"));
    assert!(!stdout.contains('\x07'));
}

#[test]
fn test_json_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["run"], "add 3 Plan\nwork 40\njson\n");
    assert_eq!(code, 0);

    let start = stdout.find('{').expect("snapshot printed");
    let end = stdout.rfind('}').expect("snapshot printed");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout[start..=end]).unwrap();
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["work_minutes"], 40);
    assert_eq!(snapshot["time_left_secs"], 2400);
    assert_eq!(snapshot["tasks"][0]["title"], "Plan");
}

#[test]
fn test_config_get_set_reset() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.work_minutes"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.work_minutes", "40"], "");
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.work_minutes"], "");
    assert_eq!(stdout.trim(), "40");

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"], "");
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.work_minutes"], "");
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "timer.nope"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["config", "set", "timer.work_minutes", "soon"],
        "",
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_values_feed_the_shell() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "ui.show_focus_details", "true"], "");
    run_cli(dir.path(), &["config", "set", "timer.work_minutes", "50"], "");

    let (stdout, _, code) = run_cli(dir.path(), &["run"], "status\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("[Work Session] 50:00 paused"));
    assert!(stdout.contains("Detected distractions: 0"));
}

#[test]
fn test_shell_logs_clock_period_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli_logged(
        dir.path(),
        &["run", "--tick-ms", "250"],
        "quit\n",
        Some("info"),
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("shell started"), "{stderr}");
    assert!(stderr.contains("period=250ms"), "{stderr}");
    assert!(!stdout.contains("shell started"));
}
