// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Traversal-key map for raw tracker payloads.
//!
//! Every standard field is located with a JSON pointer (RFC 6901) into the
//! "get issue" response. The defaults match Jira's REST API v2. Sites that
//! store the epic link in a custom field can point `epic_link` at it.

use serde::{Deserialize, Serialize};

/// Custom field Jira Cloud uses for the legacy "Epic Link".
pub const DEFAULT_EPIC_LINK_FIELD: &str = "customfield_10014";

/// Where each standard field lives in a raw payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPaths {
    pub key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub reporter: String,
    pub labels: String,
    pub components: String,
    pub comments: String,
    pub created: String,
    pub updated: String,
    pub issue_links: String,
    pub subtasks: String,
    pub parent: String,
    /// Name of the epic-link custom field under `fields`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_link: Option<String>,
}

impl Default for FieldPaths {
    fn default() -> Self {
        FieldPaths {
            key: "/key".to_string(),
            summary: "/fields/summary".to_string(),
            description: "/fields/description".to_string(),
            issue_type: "/fields/issuetype/name".to_string(),
            status: "/fields/status/name".to_string(),
            priority: "/fields/priority/name".to_string(),
            assignee: "/fields/assignee".to_string(),
            reporter: "/fields/reporter".to_string(),
            labels: "/fields/labels".to_string(),
            components: "/fields/components".to_string(),
            comments: "/fields/comment/comments".to_string(),
            created: "/fields/created".to_string(),
            updated: "/fields/updated".to_string(),
            issue_links: "/fields/issuelinks".to_string(),
            subtasks: "/fields/subtasks".to_string(),
            parent: "/fields/parent".to_string(),
            epic_link: Some(DEFAULT_EPIC_LINK_FIELD.to_string()),
        }
    }
}

impl FieldPaths {
    /// Sets the epic-link custom field name (builder pattern).
    pub fn with_epic_link(mut self, field: Option<String>) -> Self {
        self.epic_link = field;
        self
    }

    /// JSON pointer of the epic-link field, if one is configured.
    pub fn epic_link_pointer(&self) -> Option<String> {
        self.epic_link
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| format!("/fields/{}", f))
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
