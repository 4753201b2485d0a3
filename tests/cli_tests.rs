//! CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use clientdb::testkit::config::MEMORY_CONFIG_TOML;
use predicates::prelude::*;
use tempfile::TempDir;

fn clientdb() -> Command {
    cargo_bin_cmd!("clientdb")
}

fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn test_help() {
    clientdb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clientdb"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version() {
    clientdb()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clientdb"));
}

#[test]
fn test_unknown_subcommand_fails() {
    clientdb().arg("migrate").assert().failure();
}

#[test]
fn check_reports_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    clientdb()
        .args(["check", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn check_rejects_invalid_config() {
    let (_dir, path) = write_temp_config("[router]\nstore_timeout_ms = 0\n");
    clientdb()
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("router.store_timeout_ms"));
}

#[test]
fn check_passes_with_memory_stores() {
    let (_dir, path) = write_temp_config(MEMORY_CONFIG_TOML);
    clientdb()
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("All stores reachable"));
}

#[test]
fn check_json_output_is_line_delimited() {
    let (_dir, path) = write_temp_config(MEMORY_CONFIG_TOML);
    let output = clientdb()
        .args(["--json", "check", "--config"])
        .arg(&path)
        .output()
        .expect("run clientdb");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
        serde_json::from_str::<serde_json::Value>(line)
            .unwrap_or_else(|e| panic!("not JSON: {line} ({e})"));
    }
}

#[test]
fn init_creates_sqlite_schema_and_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("clients.db");
    let toml = format!(
        "[relational]\nbackend = \"sqlite\"\nurl = \"{}\"\n\n[document]\nbackend = \"memory\"\n",
        db_path.display()
    );
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, toml).unwrap();

    for _ in 0..2 {
        clientdb()
            .env_remove("SQL_URI")
            .args(["init", "--config"])
            .arg(&config_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("Relational table ready"));
    }
    assert!(db_path.exists());

    clientdb()
        .env_remove("SQL_URI")
        .args(["check", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("relational store reachable"));
}

#[test]
fn serve_rejects_bad_bind_override() {
    let (_dir, path) = write_temp_config(MEMORY_CONFIG_TOML);
    clientdb()
        .args(["serve", "--bind", "not-an-address", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("server.bind"));
}
