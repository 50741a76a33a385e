// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `jex completion`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

fn jex() -> Command {
    cargo_bin_cmd!("jex")
}

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_non_empty_output(shell: &str) {
    let output = jex().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.is_empty(), "Completion output should not be empty");
}

#[test]
fn completion_bash_mentions_subcommands() {
    let output = jex().args(["completion", "bash"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("complete"));
    assert!(stdout.contains("export"));
    assert!(stdout.contains("formats"));
}

#[test]
fn completion_zsh_generates_valid_script() {
    let output = jex().args(["completion", "zsh"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("#compdef jex"));
}

#[test]
fn completion_without_shell_shows_help() {
    let output = jex().arg("completion").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}

#[test]
fn completion_invalid_shell_fails() {
    jex().args(["completion", "invalid_shell"]).assert().failure();
}
