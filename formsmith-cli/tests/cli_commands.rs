//! End-to-end tests of the non-interactive commands.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FORM: &str = r#"[
    {"id":"name","label":"Name","type":"text","validationType":"string",
     "validations":[{"type":"required","params":["name is required"]},{"type":"min","params":[2,"name must be at least 2 characters"]}]},
    {"id":"age","label":"Age","type":"text","validationType":"number",
     "validations":[{"type":"min","params":[0,"age must be a positive number"]}]},
    {"id":"plan","label":"Plan","type":"radio","validationType":"string","options":["Free","Pro"],
     "validations":[{"type":"required","params":["plan is required"]}]},
    {"id":"broken"}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Command isolated from any configuration on the machine.
fn formsmith(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("formsmith").unwrap();
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("RUST_LOG", "warn")
        .env_remove("FORMSMITH_IMPORT__SUCCESS_DISMISS_MS");
    cmd
}

#[test]
fn check_reports_kept_fields() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", FORM);

    formsmith(dir.path())
        .arg("check")
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 4 entries kept"))
        .stdout(predicate::str::contains("number: >= 0"));
}

#[test]
fn check_json_output() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", FORM);

    let output = formsmith(dir.path())
        .args(["check", "--format", "json"])
        .arg(&form)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["entries"], 4);
    assert_eq!(report["kept"], 3);
    assert_eq!(report["fields"][2]["id"], "plan");
}

#[test]
fn check_without_fields_exits_one() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", r#"[{"id":"x"}]"#);

    formsmith(dir.path())
        .arg("check")
        .arg(&form)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No valid fields found in JSON"));
}

#[test]
fn check_invalid_json_exits_two() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", "not json");

    formsmith(dir.path())
        .arg("check")
        .arg(&form)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON format"));
}

#[test]
fn check_missing_file_exits_two() {
    let dir = TempDir::new().unwrap();
    formsmith(dir.path())
        .args(["check", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read missing.json"));
}

#[test]
fn validate_reports_failures() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", FORM);
    let values = write(&dir, "values.json", r#"{"name": "J", "age": "old"}"#);

    formsmith(dir.path())
        .arg("validate")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("name must be at least 2 characters"))
        .stdout(predicate::str::contains("Age must be a number"))
        .stdout(predicate::str::contains("plan is required"));
}

#[test]
fn validate_passes_complete_values() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", FORM);
    let values = write(&dir, "values.json", r#"{"name": "Jo", "age": 30, "plan": "Pro"}"#);

    let output = formsmith(dir.path())
        .args(["validate", "--format", "json"])
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result, serde_json::json!({"valid": true, "errors": {}}));
}

#[test]
fn project_config_changes_messages() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".formsmith")).unwrap();
    write(
        &dir,
        ".formsmith/formsmith.toml",
        "[validation]\nnumber_type_message = \"{label}: digits only\"\n",
    );
    let form = write(&dir, "form.json", FORM);
    let values = write(&dir, "values.json", r#"{"name": "Jo", "age": "x", "plan": "Free"}"#);

    formsmith(dir.path())
        .arg("validate")
        .arg(&form)
        .arg("--values")
        .arg(&values)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Age: digits only"));
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "settings.toml", "[import]\nsuccess_dismiss_ms = \"later\"\n");
    let form = write(&dir, "form.json", FORM);

    formsmith(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&form)
        .assert()
        .success()
        .stderr(predicate::str::contains("Continuing with default configuration"));
}

#[test]
fn fill_needs_a_terminal() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", FORM);

    formsmith(dir.path())
        .arg("fill")
        .arg(&form)
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("needs an interactive terminal"));
}

#[test]
fn build_from_file_without_fields_exits_one() {
    let dir = TempDir::new().unwrap();
    let form = write(&dir, "form.json", "[]");

    formsmith(dir.path())
        .args(["build", "--from"])
        .arg(&form)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No valid fields found in JSON"));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    formsmith(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"));
}
