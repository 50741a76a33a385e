// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `jex export`, run offline against saved payloads.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use yare::parameterized;

const CREDENTIAL_VARS: [&str; 4] = ["JIRA_API_TOKEN", "JIRA_API_URL", "JIRA_API_USER", "JIRA_EMAIL"];

/// Runs `jex` with an empty config file and no Jira credentials in the
/// environment.
fn jex(home: &TempDir) -> Command {
    let config = home.path().join("empty-config.toml");
    fs::write(&config, "").unwrap();
    let mut cmd = cargo_bin_cmd!("jex");
    cmd.env("JEX_CONFIG", &config);
    cmd.env_remove("JEX_LOG");
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(home.path());
    cmd
}

const PROJ_1: &str = r#"{
  "key": "PROJ-1",
  "fields": {
    "summary": "Checkout fails",
    "issuetype": { "name": "Bug" },
    "status": { "name": "Open" },
    "assignee": null,
    "subtasks": [
      { "key": "PROJ-2", "fields": { "summary": "Add regression test", "status": { "name": "To Do" } } }
    ],
    "issuelinks": [
      {
        "type": { "name": "Blocks", "inward": "is blocked by", "outward": "blocks" },
        "outwardIssue": { "key": "PROJ-3", "fields": { "summary": "Release" } }
      }
    ]
  }
}"#;

const PROJ_9: &str = r#"{ "fields": { "summary": "Lost its key", "issuetype": { "name": "Task" } } }"#;

/// A working directory with saved payloads under `saved/`.
fn workspace() -> TempDir {
    let home = TempDir::new().unwrap();
    let saved = home.path().join("saved");
    fs::create_dir(&saved).unwrap();
    fs::write(saved.join("PROJ-1.json"), PROJ_1).unwrap();
    fs::write(saved.join("PROJ-9.json"), PROJ_9).unwrap();
    home
}

#[parameterized(
    xml = { "xml", "xml" },
    json = { "json", "json" },
    markdown = { "markdown", "md" },
    raw = { "raw", "txt" },
)]
fn export_writes_file_with_extension(format: &str, extension: &str) {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "--from", "saved", "-o", "out", "-f", format])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported PROJ-1"));

    let path = home.path().join("out").join(format!("PROJ-1_export.{}", extension));
    assert!(path.exists(), "missing {}", path.display());
}

#[test]
fn export_defaults_to_xml_in_current_directory() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "--from", "saved"])
        .assert()
        .success();

    let xml = fs::read_to_string(home.path().join("PROJ-1_export.xml")).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<group label=\"blocks\">"));
}

#[test]
fn export_stdout_json_groups_related_issues() {
    let home = workspace();
    let output = jex(&home)
        .args(["export", "PROJ-1", "--from", "saved", "-f", "json", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let related = &value["issue"]["related_issues"];
    assert_eq!(related["subtasks"], json!(["PROJ-2"]));
    assert_eq!(related["links"]["blocks"], json!(["PROJ-3"]));
    assert_eq!(related["details"]["PROJ-2"]["summary"], "Add regression test");
    assert_eq!(value["issue"]["people"]["assignee"]["name"], "");
}

#[test]
fn export_markdown_lists_subtasks_and_links() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "--from", "saved", "-f", "md", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Subtasks\n\n- PROJ-2"))
        .stdout(predicate::str::contains("### blocks\n\n- PROJ-3"))
        .stdout(predicate::str::contains("## People").not());
}

#[test]
fn export_raw_is_verbatim() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "--from", "saved", "-f", "raw", "--stdout"])
        .assert()
        .success()
        .stdout(PROJ_1);
}

#[test]
fn export_partial_failure_exits_zero() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1,PROJ-9", "--from", "saved", "-o", "out"])
        .assert()
        .success()
        .stderr(predicate::str::contains("PROJ-9"))
        .stderr(predicate::str::contains("missing required field: key"));

    assert!(home.path().join("out/PROJ-1_export.xml").exists());
}

#[test]
fn export_nothing_exported_fails() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-9", "NOPE-1", "--from", "saved"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing exported"));
}

#[test]
fn export_unsupported_format_fails() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "--from", "saved", "-f", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format: 'yaml'"))
        .stderr(predicate::str::contains("valid formats are"));

    assert!(!home.path().join("PROJ-1_export.xml").exists());
}

#[test]
fn export_without_credentials_explains_what_is_missing() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "--token", "env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing API token"))
        .stderr(predicate::str::contains("JIRA_API_TOKEN"));
}

#[test]
fn export_reads_epic_link_field_from_config() {
    let home = workspace();
    fs::write(
        home.path().join("saved/PROJ-5.json"),
        r#"{ "key": "PROJ-5", "fields": { "issuetype": { "name": "Story" }, "customfield_10008": "EPIC-3" } }"#,
    )
    .unwrap();
    let config = home.path().join("config.toml");
    fs::write(&config, "[fields]\nepic_link = \"customfield_10008\"\n").unwrap();

    let output = jex(&home)
        .env("JEX_CONFIG", &config)
        .args(["export", "PROJ-5", "--from", "saved", "-f", "json", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["issue"]["related_issues"]["parent"], json!(["EPIC-3"]));
}

#[test]
fn export_unsupported_format_wins_over_missing_credentials() {
    let home = workspace();
    jex(&home)
        .args(["export", "PROJ-1", "-f", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format: 'yaml'"))
        .stderr(predicate::str::contains("missing API token").not());
}

#[test]
fn export_unsupported_format_wins_over_bad_config() {
    let home = workspace();
    let config = home.path().join("bad.toml");
    fs::write(&config, "server = [\n").unwrap();

    jex(&home)
        .env("JEX_CONFIG", &config)
        .args(["export", "PROJ-1", "--from", "saved", "-f", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format: 'yaml'"));
}

#[test]
fn export_with_missing_config_file_fails() {
    let home = workspace();
    jex(&home)
        .env("JEX_CONFIG", home.path().join("missing-config.toml"))
        .args(["export", "PROJ-1", "--from", "saved"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"))
        .stderr(predicate::str::contains("missing-config.toml"));

    assert!(!home.path().join("PROJ-1_export.xml").exists());
}

/// An epic and its children, linked by `parent` and by the epic-link field.
fn epic_workspace() -> TempDir {
    let home = workspace();
    let saved = home.path().join("saved");
    let issues = [
        ("EPIC-7", json!({ "key": "EPIC-7", "fields": { "summary": "Payments", "issuetype": { "name": "Epic" } } })),
        ("PROJ-20", json!({ "key": "PROJ-20", "fields": {
            "summary": "Refund flow", "issuetype": { "name": "Story" },
            "assignee": { "displayName": "Ada Lovelace" }, "parent": { "key": "EPIC-7" } } })),
        ("PROJ-21", json!({ "key": "PROJ-21", "fields": {
            "summary": "Invoice export", "issuetype": { "name": "Story" },
            "customfield_10014": "EPIC-7" } })),
    ];
    for (key, payload) in issues {
        fs::write(saved.join(format!("{}.json", key)), payload.to_string()).unwrap();
    }
    home
}

#[test]
fn export_epic_lists_its_children() {
    let home = epic_workspace();
    let output = jex(&home)
        .args(["export", "EPIC-7", "--from", "saved", "-f", "json", "--stdout"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let related = &value["issue"]["related_issues"];
    assert_eq!(related["epic_children"], json!(["PROJ-20", "PROJ-21"]));
    assert_eq!(related["details"]["PROJ-20"]["assignee"]["name"], "Ada Lovelace");
}

#[test]
fn export_epic_markdown_shows_child_details() {
    let home = epic_workspace();
    jex(&home)
        .args(["export", "EPIC-7", "--from", "saved", "-f", "md", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "### Child Issues\n\n- PROJ-20: Refund flow [Story]\n  - **Assignee:** Ada Lovelace",
        ));
}

#[test]
fn export_shallow_skips_child_search() {
    let home = epic_workspace();
    let output = jex(&home)
        .args(["export", "EPIC-7", "--from", "saved", "-f", "json", "--stdout", "--shallow"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["issue"]["related_issues"]["epic_children"], json!([]));
}
