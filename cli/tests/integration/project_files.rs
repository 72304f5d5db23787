//! `bcn run` target resolution from project files in the working directory.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn bcn_in(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bcn"));
    cmd.env("NO_COLOR", "1")
        .env("BCN_CONFIG_DIR", dir)
        .env("BARCELONA_ENDPOINT", "http://127.0.0.1:9")
        .env_remove("BCN_DEBUG")
        .current_dir(dir);
    cmd
}

#[test]
fn test_run_unknown_environment_is_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("barcelona.yml"),
        "environments:\n  production:\n    name: web-production\n",
    )
    .expect("write");

    bcn_in(dir.path())
        .args(["run", "-e", "staging", "bash"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("environment is invalid"));
}

#[test]
fn test_run_without_project_file_names_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    bcn_in(dir.path())
        .args(["run", "-e", "production", "bash"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("barcelona.yml"));
}

#[test]
fn test_run_branch_without_review_file_names_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    bcn_in(dir.path())
        .args(["run", "-b", "feature/x", "bash"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("barcelona-review.yml"));
}
