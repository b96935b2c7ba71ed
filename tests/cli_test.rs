//! Integration tests for the devsetup binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".devsetup");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), config).unwrap();
    fs::create_dir_all(temp.path().join("scripts")).unwrap();
    temp
}

fn write_script(project: &Path, name: &str, body: &str) {
    fs::write(
        project.join("scripts").join(name),
        format!("#!/bin/sh\n{}\n", body),
    )
    .unwrap();
}

fn devsetup(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("devsetup"));
    cmd.current_dir(project)
        .arg("--non-interactive")
        .arg("--no-color")
        .env_remove("DEVSETUP_PROMPT_COMPONENTS")
        .env_remove("DEVSETUP_CONFIG")
        .env_remove("DEVSETUP_LOG_FILE");
    cmd
}

// Components install by touching a marker file in the project root and are
// verified by checking for it.
const CONFIG: &str = r#"
settings:
  settle_delay_secs: 0
components:
  base:
    script: install-base.sh
    verify_command: test -f base.installed
    critical: true
  app:
    display_name: The App
    script: install-app.sh
    depends_on: [base]
    verify_command: test -f app.installed
  flaky:
    script: install-flaky.sh
    verify_command: test -f flaky.installed
"#;

fn project() -> TempDir {
    let temp = setup_project(CONFIG);
    write_script(temp.path(), "install-base.sh", "echo base; touch base.installed");
    write_script(temp.path(), "install-app.sh", "echo app; touch app.installed");
    write_script(temp.path(), "install-flaky.sh", "echo flaky broke >&2; exit 3");
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("devsetup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--verify-only"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("devsetup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_list_shows_config_components() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("The App"))
        .stdout(predicate::str::contains("git"));
    assert!(!temp.path().join(".devsetup/logs/install.log").exists());
    Ok(())
}

#[test]
fn cli_unknown_component_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path())
        .args(["-c", "emacs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown component: emacs"));
    Ok(())
}

#[test]
fn cli_no_selection_non_interactive_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path()).assert().code(2);
    Ok(())
}

#[test]
fn cli_prompt_answer_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path())
        .env("DEVSETUP_PROMPT_COMPONENTS", "base")
        .assert()
        .success();
    assert!(temp.path().join("base.installed").exists());
    Ok(())
}

#[test]
fn cli_installs_dependencies_first() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path())
        .args(["-c", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base -> app"))
        .stdout(predicate::str::contains("2 installed"));
    assert!(temp.path().join("base.installed").exists());
    assert!(temp.path().join("app.installed").exists());
    Ok(())
}

#[test]
fn cli_second_run_reports_already_installed() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path()).args(["-c", "base"]).assert().success();
    devsetup(temp.path())
        .args(["-c", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 already installed"));
    Ok(())
}

#[test]
fn cli_non_critical_failure_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path())
        .args(["-c", "flaky,base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flaky broke"))
        .stdout(predicate::str::contains("1 failed"));
    assert!(temp.path().join("base.installed").exists());
    Ok(())
}

#[test]
fn cli_critical_failure_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    write_script(temp.path(), "install-base.sh", "exit 1");
    devsetup(temp.path())
        .args(["-c", "app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Critical component 'base'"));
    assert!(!temp.path().join("app.installed").exists());
    Ok(())
}

#[test]
fn cli_verify_only_reports_missing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    fs::write(temp.path().join("base.installed"), "").unwrap();
    devsetup(temp.path())
        .args(["--verify-only", "-c", "base,app"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing"));
    assert!(!temp.path().join("app.installed").exists());
    Ok(())
}

#[test]
fn cli_verify_only_all_present() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    fs::write(temp.path().join("base.installed"), "").unwrap();
    devsetup(temp.path())
        .args(["--verify-only", "-c", "base"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn cli_writes_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    devsetup(temp.path()).args(["-c", "base"]).assert().success();

    let log = fs::read_to_string(temp.path().join(".devsetup/logs/install.log"))?;
    let first = log.lines().next().unwrap();
    assert!(first.starts_with('['));
    assert!(first.contains("] [INFO] "));
    assert!(log.contains("base"));
    Ok(())
}

#[test]
fn cli_log_file_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    let log = temp.path().join("custom.log");
    devsetup(temp.path())
        .args(["-c", "base", "--log-file"])
        .arg(&log)
        .assert()
        .success();
    assert!(log.exists());
    Ok(())
}

#[test]
fn cli_invalid_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("components: [not, a, map]\n");
    devsetup(temp.path()).arg("--all").assert().code(2);
    Ok(())
}

#[test]
fn cli_successful_installer_stderr_stays_in_log() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    write_script(
        temp.path(),
        "install-base.sh",
        "echo 'progress 42% DOWNLOADING' >&2; touch base.installed",
    );
    devsetup(temp.path())
        .args(["-c", "base"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOWNLOADING").not())
        .stderr(predicate::str::contains("DOWNLOADING").not());

    let log = fs::read_to_string(temp.path().join(".devsetup/logs/install.log"))?;
    assert!(log.contains("[INFO] [base] progress 42% DOWNLOADING"));
    Ok(())
}

#[test]
fn cli_detailed_shows_installer_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project();
    write_script(
        temp.path(),
        "install-base.sh",
        "echo 'progress 42% DOWNLOADING' >&2; touch base.installed",
    );
    devsetup(temp.path())
        .args(["-c", "base", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DOWNLOADING"));
    Ok(())
}
