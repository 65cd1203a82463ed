//! Integration tests for the xat CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("xat").unwrap();
    cmd.arg("--no-color").env_remove("SKIP_PROMPT");
    cmd
}

/// Project with a config that turns off a few features
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    let config_content = r#"
{
  "options": {
    "gitignore": false,
    "formatters": false,
    "yaml": false
  },
  "configs": [
    { "name": "local/scripts", "files": ["scripts/**"], "rules": { "no-console": "off" } }
  ]
}
"#;

    fs::write(temp_dir.path().join("xat.config.json"), config_content).unwrap();
    temp_dir
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_print_names_in_order() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["print", "--names", "--no-editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xat/javascript/rules"))
        .stdout(predicate::str::contains("local/scripts"))
        .stdout(predicate::str::contains("xat/yaml").not())
        .stdout(predicate::str::contains("xat/formatters").not());
}

#[test]
fn test_print_json() {
    let project = create_test_project();

    let output = cli()
        .current_dir(project.path())
        .args(["print", "--format", "json", "--no-editor"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fragments = parsed.as_array().unwrap();
    assert_eq!(
        fragments.last().unwrap()["name"],
        serde_json::json!("local/scripts")
    );
}

#[test]
fn test_print_with_explicit_missing_config() {
    let project = TempDir::new().unwrap();

    cli()
        .current_dir(project.path())
        .args(["--config", "missing.json", "print"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_files_option_is_rejected() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".xatrc.json"),
        r#"{ "options": { "files": ["**/*.ts"] } }"#,
    )
    .unwrap();

    cli()
        .current_dir(project.path())
        .args(["print", "--names"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_rules_for_file() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["rules", "scripts/build.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-console"));

    cli()
        .current_dir(project.path())
        .args(["rules", "node_modules/pkg/index.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rules apply"));
}

#[test]
fn test_init_writes_config() {
    let project = TempDir::new().unwrap();

    cli()
        .current_dir(project.path())
        .args(["init", "--yes", "--frameworks", "react", "--extra", "formatters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created xat.config.json"))
        .stdout(predicate::str::contains("@eslint-react/eslint-plugin"));

    let written = fs::read_to_string(project.path().join("xat.config.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["options"]["react"], serde_json::json!(true));
    assert_eq!(parsed["options"]["formatters"], serde_json::json!(true));
}

#[test]
fn test_init_aborts_when_config_exists() {
    let project = TempDir::new().unwrap();
    let path = project.path().join("xat.config.json");
    fs::write(&path, "{}").unwrap();

    cli()
        .current_dir(project.path())
        .args(["init", "--yes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn test_init_without_terminal_writes_nothing() {
    let project = TempDir::new().unwrap();

    // stdin is not a terminal, so the prompt cannot run
    cli()
        .current_dir(project.path())
        .arg("init")
        .write_stdin("")
        .assert()
        .failure();

    assert!(!project.path().join("xat.config.json").exists());
}

#[test]
fn test_init_rejects_unknown_framework() {
    let project = TempDir::new().unwrap();

    cli()
        .current_dir(project.path())
        .args(["init", "--yes", "--frameworks", "vue"])
        .assert()
        .failure()
        .code(1);

    assert!(!project.path().join("xat.config.json").exists());
}
