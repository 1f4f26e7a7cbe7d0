#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn stack_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "config:\n  environment: dev\n  resource-group-name: rg-website-dev\n  storage-account-name: sawebsitedev"
    )
    .unwrap();
    file
}

/// The help lists the preview command
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("skyweave").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("skyweave").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skyweave"));
}

/// Preview prints resources and exports, masking the storage key
#[test]
fn test_preview_masks_secrets() {
    let file = stack_file();
    let mut cmd = Command::cargo_bin("skyweave").unwrap();
    cmd.env_remove("SKYWEAVE_CONFIG")
        .env("NO_COLOR", "1")
        .arg("preview")
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Resources (4):"))
        .stdout(predicate::str::contains("https://sa.web.core.windows.net"))
        .stdout(predicate::str::contains("[secret]"))
        .stdout(predicate::str::contains("valueKeyStorage").not());
}

#[test]
fn test_preview_show_secrets() {
    let file = stack_file();
    let mut cmd = Command::cargo_bin("skyweave").unwrap();
    cmd.env_remove("SKYWEAVE_CONFIG")
        .arg("preview")
        .arg("--config")
        .arg(file.path())
        .arg("--show-secrets")
        .assert()
        .success()
        .stdout(predicate::str::contains("valueKeyStorage"));
}

/// Missing configuration fails the command and names the key
#[test]
fn test_preview_reports_missing_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "config:\n  environment: dev").unwrap();

    let mut cmd = Command::cargo_bin("skyweave").unwrap();
    cmd.env_remove("SKYWEAVE_CONFIG")
        .arg("preview")
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("website:resource-group-name"));
}

#[test]
fn test_preview_reads_config_from_env() {
    let mut cmd = Command::cargo_bin("skyweave").unwrap();
    let dir = tempfile::tempdir().unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SKYWEAVE_STACK_FILE")
        .env(
            "SKYWEAVE_CONFIG",
            r#"{"environment": "ci", "resource-group-name": "rg-ci", "storage-account-name": "saci"}"#,
        )
        .arg("preview")
        .arg("--stack")
        .arg("ci")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://sa.web.core.windows.net"));
}
