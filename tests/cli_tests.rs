//! Integration tests for the CLI interface
//!
//! Runs the binary against the CSV fixture dump in a scratch directory.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_VARS: [&str; 4] = [
    "PADDOCK_DATA_DIR",
    "PADDOCK_LOG_LEVEL",
    "PADDOCK_FORMAT",
    "PADDOCK_CACHE_SNAPSHOTS",
];

/// Command running in an empty working directory, pointed at a fresh dump
fn paddock() -> (TempDir, TempDir, Command) {
    let data = common::dataset_dir().unwrap();
    let work = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("paddock").unwrap();
    cmd.current_dir(work.path()).arg("--data-dir").arg(data.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    (data, work, cmd)
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("paddock").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("head-to-head"))
        .stdout(predicate::str::contains("dnf-causes"));
}

#[test]
fn test_constructor_help_lists_views() {
    let mut cmd = Command::cargo_bin("paddock").unwrap();
    cmd.args(["constructor", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seasons"))
        .stdout(predicate::str::contains("heatmap"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("paddock").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_constructor_seasons_json() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["--format", "json", "constructor", "1", "seasons"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"year\":2009"))
        .stdout(predicate::str::contains("\"avgGrid\":8.3"));
}

#[test]
fn test_default_format_is_pretty_json() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["driver", "1", "career"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"surname\": \"Hamilton\""))
        .stdout(predicate::str::contains("\"yearsActive\": \"2008-2009\""));
}

#[test]
fn test_driver_positions_markdown() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["driver", "3", "positions", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("| position | count |"))
        .stdout(predicate::str::contains("| 8 | 1 |"));
}

#[test]
fn test_head_to_head_csv() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["--format", "csv", "head-to-head", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "driver1Id,driver2Id,driver1,driver2,sharedRaces",
        ))
        .stdout(predicate::str::contains("1,2,Lewis Hamilton,Heikki Kovalainen,4"));
}

#[test]
fn test_dnf_causes_text() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["--format", "text", "dnf-causes"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("status"))
        .stdout(predicate::str::contains("Engine    2"));
}

#[test]
fn test_unknown_format_fails() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["--format", "yaml", "dnf-causes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

#[test]
fn test_missing_dataset_fails() {
    let work = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("paddock").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(work.path())
        .args(["--data-dir", "no-such-dir", "dnf-causes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dataset"));
}

#[test]
fn test_project_config_file_sets_format() {
    let (_data, work, mut cmd) = paddock();
    fs::write(work.path().join("paddock.toml"), "format = \"csv\"\n").unwrap();
    cmd.args(["driver", "1", "trajectory"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "year,round,seasonPoints,cumulativePoints,seasonRaces,cumulativeRaces",
        ));
}

#[test]
fn test_env_overrides_config_file() {
    let (_data, work, mut cmd) = paddock();
    fs::write(work.path().join("paddock.toml"), "format = \"csv\"\n").unwrap();
    cmd.env("PADDOCK_FORMAT", "json")
        .args(["constructor", "4", "geo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{\"country\":\"Australia\""));
}

#[test]
fn test_flag_overrides_env() {
    let (_data, _work, mut cmd) = paddock();
    cmd.env("PADDOCK_FORMAT", "csv")
        .args(["--format", "json", "constructor", "1", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"totalPoles\":2"));
}

#[test]
fn test_explicit_config_file_must_exist() {
    let (_data, _work, mut cmd) = paddock();
    cmd.args(["--config", "missing.toml", "dnf-causes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_data_dir_from_env() {
    let data = common::dataset_dir().unwrap();
    let work = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("paddock").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(work.path())
        .env("PADDOCK_DATA_DIR", data.path())
        .env("PADDOCK_CACHE_SNAPSHOTS", "false")
        .args(["--format", "json", "driver", "3", "circuits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Albert Park Grand Prix Circuit"));
}
