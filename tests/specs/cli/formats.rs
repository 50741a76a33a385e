// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `jex formats`.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn jex() -> Command {
    cargo_bin_cmd!("jex")
}

#[test]
fn formats_lists_all_identifiers() {
    jex()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("xml"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"))
        .stdout(predicate::str::contains("raw"));
}

#[test]
fn formats_json_is_machine_readable() {
    let output = jex().args(["formats", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["xml", "json", "markdown", "raw"]);
}

#[test]
fn formats_rejects_unknown_output() {
    jex().args(["formats", "-o", "yaml"]).assert().failure();
}
