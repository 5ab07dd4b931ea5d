use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomofocus(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomofocus").unwrap();
    cmd.arg("--data-dir").arg(home.path()).env("NO_COLOR", "1");
    cmd
}

fn task_list_json(home: &TempDir) -> serde_json::Value {
    let output = pomofocus(home)
        .args(["task", "list", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_status_on_fresh_home() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("25:00"))
        .stdout(predicate::str::contains("No tasks"));

    assert!(home.path().join("pomofocus.db").exists());
    assert!(home.path().join("config.yaml").exists());
}

#[test]
fn test_status_json() {
    let home = TempDir::new().unwrap();

    let output = pomofocus(&home)
        .args(["status", "--output", "json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["sessionType"], "focus");
    assert_eq!(value["formattedTime"], "25:00");
    assert_eq!(value["dailyCount"], 0);
    assert_eq!(value["active"], false);
}

#[test]
fn test_task_add_persists() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .args(["task", "add", "Write report", "-p", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report"));

    let value = task_list_json(&home);
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["name"], "Write report");
    assert_eq!(value["items"][0]["pomodorosNeeded"], 3);
}

#[test]
fn test_task_add_rejects_empty_name() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .args(["task", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task name is empty"));
}

#[test]
fn test_task_add_rejects_out_of_range_estimate() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .args(["task", "add", "x", "-p", "11"])
        .assert()
        .failure();
}

#[test]
fn test_fourth_task_rejected() {
    let home = TempDir::new().unwrap();
    for name in ["a", "b", "c"] {
        pomofocus(&home).args(["task", "add", name]).assert().success();
    }

    pomofocus(&home)
        .args(["task", "add", "d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 3"));

    assert_eq!(task_list_json(&home)["count"], 3);
}

#[test]
fn test_task_delete_by_prefix() {
    let home = TempDir::new().unwrap();
    pomofocus(&home).args(["task", "add", "a"]).assert().success();

    let id = task_list_json(&home)["items"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    pomofocus(&home)
        .args(["task", "delete", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task: a"));

    assert_eq!(task_list_json(&home)["count"], 0);
}

#[test]
fn test_task_delete_unknown_fails() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .args(["task", "delete", "ffffffff"])
        .assert()
        .failure();
}

#[test]
fn test_dark_mode_persists() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .args(["dark-mode", "on", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"darkModeEnabled\": true"));

    pomofocus(&home)
        .arg("dark-mode")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dark mode off"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    pomofocus(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomofocus"));
}

#[test]
fn test_invalid_config_rejected() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "timer:\n  focus_minutes: 0\n",
    )
    .unwrap();

    pomofocus(&home).arg("status").assert().failure();
}
