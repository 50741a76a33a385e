// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw issue payloads as returned by the tracker.
//!
//! A [`RawIssue`] keeps the response body exactly as received (for the
//! passthrough format) alongside the parsed JSON value and the issue's
//! remote links, which the tracker serves from a separate endpoint.

use serde_json::Value;

use crate::error::Result;

/// One fetched issue, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawIssue {
    body: String,
    payload: Value,
    remote_links: Vec<Value>,
}

impl RawIssue {
    /// Parses a "get issue" response body, keeping the text verbatim.
    pub fn parse(body: impl Into<String>) -> Result<Self> {
        let body = body.into();
        let payload = serde_json::from_str(&body)?;
        Ok(RawIssue {
            body,
            payload,
            remote_links: Vec::new(),
        })
    }

    /// Wraps an already parsed payload. The body becomes its pretty JSON text.
    pub fn from_value(payload: Value) -> Self {
        RawIssue {
            body: format!("{:#}", payload),
            payload,
            remote_links: Vec::new(),
        }
    }

    /// Attaches the remote-link entries (builder pattern).
    pub fn with_remote_links(mut self, remote_links: Vec<Value>) -> Self {
        self.remote_links = remote_links;
        self
    }

    /// Response body exactly as the tracker returned it.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn remote_links(&self) -> &[Value] {
        &self.remote_links
    }
}

/// Text of a scalar JSON value; absent and null become an empty string.
pub(crate) fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Entries of a JSON array; anything else is treated as empty.
pub(crate) fn array_of(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Returns the value only if it carries information (not null, not empty).
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        Some(v) => Some(v),
    }
}

/// Flattens rich text into plain text.
///
/// Plain strings pass through. Atlassian Document Format objects (REST v3)
/// are reduced to their text nodes, one line per block.
pub(crate) fn rich_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(doc @ Value::Object(_)) => {
            let mut lines = Vec::new();
            collect_blocks(doc, &mut lines);
            lines.join("\n")
        }
        _ => String::new(),
    }
}

/// Inline children join the current line; a child with its own `content`
/// is a nested block and starts a new one.
fn collect_blocks(node: &Value, lines: &mut Vec<String>) {
    let mut line = String::new();
    if let Some(Value::String(text)) = node.get("text") {
        line.push_str(text);
    }
    for child in array_of(node.get("content")) {
        if child.get("content").is_some() {
            flush_line(&mut line, lines);
            collect_blocks(child, lines);
            continue;
        }
        match child.get("type").and_then(Value::as_str) {
            Some("hardBreak") => line.push('\n'),
            _ => line.push_str(&text_of(child.get("text"))),
        }
    }
    flush_line(&mut line, lines);
}

fn flush_line(line: &mut String, lines: &mut Vec<String>) {
    if !line.is_empty() {
        lines.push(std::mem::take(line));
    }
}

#[cfg(test)]
#[path = "raw_tests.rs"]
mod tests;
