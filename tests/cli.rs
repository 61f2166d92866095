//! CLI surface tests.

mod support;

use predicates::prelude::*;
use support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("down"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deckhand"));
}

#[test]
fn test_up_rejects_unknown_profile() {
    let t = Test::new();

    t.cmd()
        .args(["up", "--profile", "tpu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_up_rejects_unknown_environment() {
    let t = Test::new();

    t.cmd()
        .args(["up", "--environment", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_up_help_shows_profile_choices() {
    let t = Test::new();

    t.cmd()
        .args(["up", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu"))
        .stdout(predicate::str::contains("gpu-nvidia"))
        .stdout(predicate::str::contains("gpu-amd"))
        .stdout(predicate::str::contains("private"))
        .stdout(predicate::str::contains("public"));
}

#[test]
fn test_completions_bash() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deckhand"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let t = Test::new();

    t.cmd().arg("scuttle").assert().failure();
}
