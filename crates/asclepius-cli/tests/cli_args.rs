//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use predicates::prelude::*;

fn asclepius(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("asclepius").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .arg("--state-file")
        .arg(dir.path().join("state.json"))
        .arg("--cache-dir")
        .arg(dir.path().join("cache"));
    cmd
}

#[test]
fn test_missing_subcommand_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_pick_requires_image() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .arg("pick")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IMAGE"));
}

#[test]
fn test_invalid_aspect_rejected() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .args(["pick", "--aspect", "16x9", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("W:H"));
}

#[test]
fn test_invalid_quality_rejected() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .args(["pick", "--quality", "0", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1..=100"));
}

#[test]
fn test_invalid_max_size_rejected() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .args(["pick", "--max-size", "big", "photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WxH"));
}

#[test]
fn test_nonexistent_image_is_a_cancelled_pick() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .args(["pick", "/nonexistent/photo.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));

    asclepius(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("source:  (none)"));
}

#[test]
fn test_status_on_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    asclepius(&dir)
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
}
