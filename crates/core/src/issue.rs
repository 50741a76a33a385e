// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical issue model.
//!
//! [`CanonicalIssue`] is the format-independent representation every
//! renderer consumes. It is built once from a [`RawIssue`] with explicit
//! field extraction and defaulting rules, so nothing downstream needs to
//! know the raw payload's shape.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::paths::FieldPaths;
use crate::raw::{array_of, present, rich_text, text_of, RawIssue};

/// Display name used when the tracker omits a comment author.
pub const UNKNOWN_PERSON: &str = "Unknown";

/// Timestamp layout used by Jira (`2024-01-15T10:30:00.000+0000`).
const TRACKER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// A user as referenced by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub display_name: String,
    /// Stable account identifier (may be empty).
    pub id: String,
}

impl Person {
    pub fn new(display_name: impl Into<String>, id: impl Into<String>) -> Self {
        Person {
            display_name: display_name.into(),
            id: id.into(),
        }
    }

    /// Placeholder for a missing author.
    pub fn unknown() -> Self {
        Person::new(UNKNOWN_PERSON, "")
    }

    /// Reads a user object. Cloud payloads identify users by `accountId`,
    /// Server/Data Center ones by `name` or `key`.
    fn from_value(value: Option<&Value>) -> Option<Self> {
        let user = present(value)?;
        let id = ["accountId", "name", "key"]
            .iter()
            .map(|field| text_of(user.get(*field)))
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        let mut display_name = text_of(user.get("displayName"));
        if display_name.is_empty() {
            display_name = id.clone();
        }
        if display_name.is_empty() {
            return None;
        }
        Some(Person { display_name, id })
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub author: Person,
    pub body: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// The normalized, format-independent representation of one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalIssue {
    /// Tracker key (e.g. `PROJ-123`). Never empty.
    pub key: String,
    pub summary: String,
    pub description: String,
    /// Issue type name (e.g. `Bug`). Never empty.
    pub issue_type: String,
    pub status: String,
    /// Priority name, empty when the tracker has none.
    pub priority: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub assignee: Option<Person>,
    pub reporter: Option<Person>,
    /// Labels in source order, duplicates removed.
    pub labels: Vec<String>,
    /// Component names in source order, duplicates removed.
    pub components: Vec<String>,
    /// Comments in chronological (source) order.
    pub comments: Vec<Comment>,
}

impl CanonicalIssue {
    /// Builds the canonical model from a raw payload.
    ///
    /// Fails with [`Error::MissingRequiredField`] when the key or issue type
    /// cannot be located, and with [`Error::MalformedField`] when a
    /// timestamp does not parse.
    pub fn from_raw(raw: &RawIssue, paths: &FieldPaths) -> Result<Self> {
        let payload = raw.payload();
        let at = |pointer: &str| payload.pointer(pointer);

        let key = required_text(at(&paths.key), "key")?;
        let issue_type = required_text(at(&paths.issue_type), "issue type")?;

        let comments = array_of(at(&paths.comments))
            .iter()
            .enumerate()
            .map(|(i, comment)| parse_comment(i, comment))
            .collect::<Result<Vec<_>>>()?;

        Ok(CanonicalIssue {
            key,
            summary: text_of(at(&paths.summary)),
            description: rich_text(at(&paths.description)),
            issue_type,
            status: text_of(at(&paths.status)),
            priority: text_of(at(&paths.priority)),
            created: parse_timestamp_field("created", at(&paths.created))?,
            updated: parse_timestamp_field("updated", at(&paths.updated))?,
            assignee: Person::from_value(at(&paths.assignee)),
            reporter: Person::from_value(at(&paths.reporter)),
            labels: dedup(array_of(at(&paths.labels)).iter().map(|l| text_of(Some(l)))),
            components: dedup(
                array_of(at(&paths.components))
                    .iter()
                    .map(|c| text_of(c.get("name"))),
            ),
            comments,
        })
    }
}

/// Formats an optional instant the way every renderer prints it
/// (RFC 3339, UTC, millisecond precision). `None` becomes an empty string.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Parses a tracker timestamp into UTC.
///
/// Accepts Jira's `+0000` offset style as well as RFC 3339.
pub fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, TRACKER_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|t| t.with_timezone(&Utc))
}

fn required_text(value: Option<&Value>, field: &'static str) -> Result<String> {
    let text = text_of(value);
    if text.trim().is_empty() {
        return Err(Error::MissingRequiredField { field });
    }
    Ok(text.trim().to_string())
}

fn parse_timestamp_field(field: &str, value: Option<&Value>) -> Result<Option<DateTime<Utc>>> {
    let malformed = |value: String, reason: String| Error::MalformedField {
        field: field.to_string(),
        value,
        reason,
    };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_timestamp(s.trim())
            .map(Some)
            .map_err(|e| malformed(s.clone(), e.to_string())),
        Some(other) => Err(malformed(other.to_string(), "expected a timestamp string".into())),
    }
}

fn parse_comment(index: usize, comment: &Value) -> Result<Comment> {
    Ok(Comment {
        author: Person::from_value(comment.get("author")).unwrap_or_else(Person::unknown),
        body: rich_text(comment.get("body")),
        created: parse_timestamp_field(&format!("comments[{}].created", index), comment.get("created"))?,
        updated: parse_timestamp_field(&format!("comments[{}].updated", index), comment.get("updated"))?,
    })
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
