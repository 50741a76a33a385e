// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared payload fixtures for unit tests.

#![allow(clippy::panic)]

use serde_json::{json, Value};

use crate::paths::FieldPaths;
use crate::raw::RawIssue;
use crate::relation::Relations;
use crate::issue::CanonicalIssue;

/// Smallest payload the builder accepts.
pub fn minimal_payload(key: &str, issue_type: &str) -> Value {
    json!({
        "key": key,
        "fields": {
            "summary": format!("Summary of {}", key),
            "issuetype": { "name": issue_type },
            "status": { "name": "Open" },
        }
    })
}

/// Payload with every standard field populated by a distinct value.
pub fn full_payload() -> Value {
    json!({
        "id": "10001",
        "key": "PROJ-1",
        "fields": {
            "summary": "Checkout & payment fails",
            "description": "Steps: add <item> to \"cart\"",
            "issuetype": { "name": "Bug" },
            "status": { "name": "In Review" },
            "priority": { "name": "Highest" },
            "created": "2024-01-15T10:30:00.000+0000",
            "updated": "2024-02-01T08:00:00.000+0200",
            "assignee": { "displayName": "Ada Lovelace", "accountId": "acc-ada" },
            "reporter": { "displayName": "Grace Hopper", "accountId": "acc-grace" },
            "labels": ["backend", "payments", "backend"],
            "components": [{ "name": "Storefront" }, { "name": "Billing" }],
            "comment": {
                "comments": [
                    {
                        "author": { "displayName": "Alan Turing", "accountId": "acc-alan" },
                        "body": "Reproduced on staging",
                        "created": "2024-01-16T09:00:00.000+0000",
                        "updated": "2024-01-16T09:05:00.000+0000"
                    },
                    {
                        "body": "Anonymous follow-up",
                        "created": "2024-01-17T12:00:00.000+0000"
                    }
                ]
            },
            "subtasks": [
                {
                    "key": "PROJ-2",
                    "fields": {
                        "summary": "Write regression test",
                        "status": { "name": "To Do" },
                        "issuetype": { "name": "Sub-task" }
                    }
                }
            ],
            "parent": {
                "key": "EPIC-7",
                "fields": {
                    "summary": "Payments epic",
                    "status": { "name": "In Progress" },
                    "issuetype": { "name": "Epic" }
                }
            },
            "issuelinks": [
                {
                    "id": "1",
                    "type": { "name": "Blocks", "inward": "is blocked by", "outward": "blocks" },
                    "outwardIssue": {
                        "key": "PROJ-3",
                        "fields": {
                            "summary": "Release 2.0",
                            "status": { "name": "Backlog" },
                            "issuetype": { "name": "Story" }
                        }
                    }
                },
                {
                    "id": "2",
                    "type": { "name": "Blocks", "inward": "is blocked by", "outward": "blocks" },
                    "inwardIssue": {
                        "key": "PROJ-4",
                        "fields": {
                            "summary": "Upgrade gateway SDK",
                            "status": { "name": "Done" },
                            "issuetype": { "name": "Task" }
                        }
                    }
                }
            ]
        }
    })
}

/// Full payload of the subtask [`full_payload`] embeds as `PROJ-2`.
pub fn subtask_payload() -> Value {
    json!({
        "key": "PROJ-2",
        "fields": {
            "summary": "Write regression test",
            "description": "Cover the partial-return path",
            "issuetype": { "name": "Sub-task" },
            "status": { "name": "To Do" },
            "priority": { "name": "Minor" },
            "created": "2024-01-18T11:00:00.000+0000",
            "updated": "2024-01-19T15:30:00.000+0000",
            "assignee": { "displayName": "Katherine Johnson", "accountId": "acc-katherine" },
            "labels": ["refunds"],
            "components": [{ "name": "Ledger" }],
            "parent": { "key": "PROJ-1" }
        }
    })
}

/// Remote links matching [`full_payload`].
pub fn full_remote_links() -> Vec<Value> {
    vec![json!({
        "id": 7,
        "relationship": "mentioned in",
        "object": { "url": "https://wiki.example.com/postmortem", "title": "Postmortem" }
    })]
}

pub fn full_raw() -> RawIssue {
    RawIssue::from_value(full_payload()).with_remote_links(full_remote_links())
}

/// Builds the canonical issue and relations for a payload with default paths.
pub fn build(raw: &RawIssue) -> (CanonicalIssue, Relations) {
    let paths = FieldPaths::default();
    let issue = match CanonicalIssue::from_raw(raw, &paths) {
        Ok(issue) => issue,
        Err(e) => panic!("fixture failed to build: {}", e),
    };
    (issue, Relations::resolve(raw, &paths))
}

/// Like [`build`], with the subtask's details filled from [`subtask_payload`].
pub fn build_detailed(raw: &RawIssue) -> (CanonicalIssue, Relations) {
    let (issue, mut relations) = build(raw);
    let (subtask, _) = build(&RawIssue::from_value(subtask_payload()));
    for related in relations.related_mut() {
        if related.key == subtask.key {
            related.fill_details(&subtask);
        }
    }
    (issue, relations)
}

/// An element read back from rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Value of the element's attribute (a map entry's key), if any.
    pub label: Option<String>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn child(&self, name: &str) -> &XmlElement {
        match self.children.iter().find(|c| c.name == name) {
            Some(child) => child,
            None => panic!("<{}> has no <{}> child", self.name, name),
        }
    }

    /// Walks a slash-separated chain of child names.
    pub fn at(&self, path: &str) -> &XmlElement {
        path.split('/').fold(self, |el, name| el.child(name))
    }
}

/// Reads back documents produced by the markup renderer.
///
/// Handles only what the renderer emits: one declaration, nested
/// elements, at most one attribute, and the five entities plus `&#13;`.
pub fn parse_xml(doc: &str) -> XmlElement {
    let body = doc.trim_start();
    let body = match body.strip_prefix("<?") {
        Some(rest) => match rest.find("?>") {
            Some(end) => &rest[end + 2..],
            None => panic!("unterminated declaration"),
        },
        None => body,
    };
    let mut parser = XmlParser {
        input: body.trim(),
        pos: 0,
    };
    let root = parser.element();
    if !parser.rest().trim().is_empty() {
        panic!("trailing content: {:?}", parser.rest());
    }
    root
}

struct XmlParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> XmlParser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, token: &str) {
        if !self.rest().starts_with(token) {
            panic!("expected {:?} at {:?}", token, self.rest());
        }
        self.pos += token.len();
    }

    fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(stop).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn element(&mut self) -> XmlElement {
        self.skip_ws();
        self.expect("<");
        let name = self
            .take_until(|c| c.is_whitespace() || c == '/' || c == '>')
            .to_string();
        let mut label = None;
        loop {
            self.skip_ws();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                return XmlElement {
                    name,
                    label,
                    text: String::new(),
                    children: Vec::new(),
                };
            }
            if self.rest().starts_with('>') {
                self.pos += 1;
                break;
            }
            self.take_until(|c| c == '=');
            self.expect("=\"");
            label = Some(decode(self.take_until(|c| c == '"')));
            self.expect("\"");
        }

        let raw_text = self.take_until(|c| c == '<');
        let mut children = Vec::new();
        let text = if self.rest().starts_with("</") {
            decode(raw_text)
        } else {
            loop {
                self.skip_ws();
                if self.rest().starts_with("</") {
                    break;
                }
                children.push(self.element());
            }
            String::new()
        };
        self.expect("</");
        self.expect(&name);
        self.expect(">");
        XmlElement {
            name,
            label,
            text,
            children,
        }
    }
}

fn decode(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#13;", "\r")
        .replace("&amp;", "&")
}
