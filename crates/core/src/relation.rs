// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Relationship resolution.
//!
//! Classifies the issues related to an exported issue (subtasks, the
//! parent or epic, children of an epic, typed issue links) and its remote
//! web links. Link
//! entries are grouped by the tracker's human-readable label for the side
//! of the link that is populated, so `blocks` and `is blocked by` land in
//! separate groups while two `blocks` links always share one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::issue::{CanonicalIssue, Person};
use crate::paths::FieldPaths;
use crate::raw::{array_of, present, text_of, RawIssue};

/// Relationship descriptor used when a remote link has none.
pub const DEFAULT_WEB_LINK_RELATIONSHIP: &str = "Web Link";

/// Which side of a typed link the related issue sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The related issue points at this one (`inwardIssue`).
    Inward,
    /// This issue points at the related one (`outwardIssue`).
    Outward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Inward => "inward",
            Direction::Outward => "outward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a related issue relates to the exported one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Subtask,
    /// Parent issue or epic.
    Parent,
    /// Issue whose parent or epic link is the exported epic.
    EpicChild,
    Link { direction: Direction, label: String },
}

impl Relationship {
    /// Category name shared by all renderers.
    pub fn category(&self) -> &'static str {
        match self {
            Relationship::Subtask => "subtask",
            Relationship::Parent => "parent",
            Relationship::EpicChild => "epic_child",
            Relationship::Link { .. } => "link",
        }
    }
}

/// Another issue referenced by the exported issue.
///
/// Embedded stubs only carry summary, status, type and priority. The
/// remaining fields stay empty until [`RelatedIssue::fill_details`] copies
/// them from the issue's own payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedIssue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub issue_type: String,
    pub priority: String,
    pub assignee: Option<Person>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub description: String,
    pub components: Vec<String>,
    pub labels: Vec<String>,
    pub relationship: Relationship,
}

impl RelatedIssue {
    /// A related issue known only by its key.
    pub fn new(key: impl Into<String>, relationship: Relationship) -> Self {
        RelatedIssue {
            key: key.into(),
            summary: String::new(),
            status: String::new(),
            issue_type: String::new(),
            priority: String::new(),
            assignee: None,
            created: None,
            updated: None,
            description: String::new(),
            components: Vec::new(),
            labels: Vec::new(),
            relationship,
        }
    }

    /// A related issue carrying every detail of a built issue.
    pub fn from_issue(issue: &CanonicalIssue, relationship: Relationship) -> Self {
        let mut related = RelatedIssue::new(issue.key.clone(), relationship);
        related.fill_details(issue);
        related
    }

    /// Replaces the stub fields with the full issue's values. The key and
    /// relationship are kept.
    pub fn fill_details(&mut self, issue: &CanonicalIssue) {
        self.summary = issue.summary.clone();
        self.status = issue.status.clone();
        self.issue_type = issue.issue_type.clone();
        self.priority = issue.priority.clone();
        self.assignee = issue.assignee.clone();
        self.created = issue.created;
        self.updated = issue.updated;
        self.description = issue.description.clone();
        self.components = issue.components.clone();
        self.labels = issue.labels.clone();
    }

    /// Reads the issue stub the tracker embeds in subtask, parent and link
    /// entries. Returns `None` when the stub carries no key.
    fn from_stub(stub: &Value, relationship: Relationship) -> Option<Self> {
        let key = stub_key(stub)?;
        let mut related = RelatedIssue::new(key, relationship);
        if let Some(fields) = stub.get("fields") {
            let field = |pointer: &str| text_of(fields.pointer(pointer));
            related.summary = field("/summary");
            related.status = field("/status/name");
            related.issue_type = field("/issuetype/name");
            related.priority = field("/priority/name");
        }
        Some(related)
    }
}

/// Key of an embedded issue stub: either a bare key string or an object
/// with a `key` member.
fn stub_key(stub: &Value) -> Option<String> {
    let key = match stub {
        Value::String(key) => key.clone(),
        other => text_of(other.get("key")),
    };
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// True when the payload names `epic_key` as its parent or epic link.
pub fn belongs_to(raw: &RawIssue, paths: &FieldPaths, epic_key: &str) -> bool {
    let payload = raw.payload();
    let mut pointers = vec![paths.parent.clone()];
    pointers.extend(paths.epic_link_pointer());
    pointers.iter().any(|pointer| {
        present(payload.pointer(pointer))
            .and_then(stub_key)
            .is_some_and(|key| key == epic_key)
    })
}

/// Linked issues sharing one link-type label, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkGroup {
    pub label: String,
    pub issues: Vec<RelatedIssue>,
}

/// A remote (web) link attached to the issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebLink {
    pub url: String,
    pub title: String,
    pub relationship: String,
}

/// A relationship entry that was skipped. Never fatal to an export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipped {source_field}[{index}]: {reason}")]
pub struct ResolutionWarning {
    /// Payload collection the entry came from.
    pub source_field: &'static str,
    pub index: usize,
    pub reason: String,
}

/// All relationships of one issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Relations {
    pub subtasks: Vec<RelatedIssue>,
    pub parent: Option<RelatedIssue>,
    /// Children of an epic. The payload does not list them, so they are
    /// only filled in when the exporter searches for them.
    pub epic_children: Vec<RelatedIssue>,
    /// Link groups in order of each label's first appearance.
    pub links: Vec<LinkGroup>,
    pub web_links: Vec<WebLink>,
    #[serde(skip)]
    pub warnings: Vec<ResolutionWarning>,
}

impl Relations {
    /// Resolves every relationship of a raw issue. Malformed entries are
    /// skipped and recorded in [`Relations::warnings`].
    pub fn resolve(raw: &RawIssue, paths: &FieldPaths) -> Self {
        let payload = raw.payload();
        let mut relations = Relations::default();

        for (index, entry) in array_of(payload.pointer(&paths.subtasks)).iter().enumerate() {
            match RelatedIssue::from_stub(entry, Relationship::Subtask) {
                Some(issue) => relations.subtasks.push(issue),
                None => relations.warn("subtasks", index, "subtask has no key"),
            }
        }

        if let Some(stub) = present(payload.pointer(&paths.parent)) {
            relations.parent = RelatedIssue::from_stub(stub, Relationship::Parent);
            if relations.parent.is_none() {
                relations.warn("parent", 0, "parent has no key");
            }
        }
        if relations.parent.is_none() {
            if let Some(stub) = paths
                .epic_link_pointer()
                .and_then(|pointer| present(payload.pointer(&pointer)))
            {
                relations.parent = RelatedIssue::from_stub(stub, Relationship::Parent);
                if relations.parent.is_none() {
                    relations.warn("epic_link", 0, "epic link has no key");
                }
            }
        }

        for (index, entry) in array_of(payload.pointer(&paths.issue_links)).iter().enumerate() {
            match resolve_link(entry) {
                Ok(issue) => relations.push_link(issue),
                Err(reason) => relations.warn("issuelinks", index, reason),
            }
        }

        for (index, entry) in raw.remote_links().iter().enumerate() {
            match resolve_web_link(entry) {
                Some(link) => relations.web_links.push(link),
                None => relations.warn("remotelinks", index, "remote link has no url"),
            }
        }

        relations
    }

    /// The group for a link-type label, if any link carries it.
    pub fn link_group(&self, label: &str) -> Option<&LinkGroup> {
        self.links.iter().find(|g| g.label == label)
    }

    /// True when there are no related issues of any category.
    pub fn has_no_related_issues(&self) -> bool {
        self.subtasks.is_empty()
            && self.parent.is_none()
            && self.epic_children.is_empty()
            && self.links.is_empty()
    }

    /// Every related issue, category by category, links in group order.
    pub fn related(&self) -> impl Iterator<Item = &RelatedIssue> {
        self.subtasks
            .iter()
            .chain(self.parent.iter())
            .chain(self.epic_children.iter())
            .chain(self.links.iter().flat_map(|group| group.issues.iter()))
    }

    /// Mutable access to every related issue, in [`Relations::related`] order.
    pub fn related_mut(&mut self) -> impl Iterator<Item = &mut RelatedIssue> {
        self.subtasks
            .iter_mut()
            .chain(self.parent.iter_mut())
            .chain(self.epic_children.iter_mut())
            .chain(self.links.iter_mut().flat_map(|group| group.issues.iter_mut()))
    }

    /// Number of entries skipped during resolution.
    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }

    fn push_link(&mut self, issue: RelatedIssue) {
        let label = match &issue.relationship {
            Relationship::Link { label, .. } => label.clone(),
            _ => return,
        };
        match self.links.iter_mut().find(|g| g.label == label) {
            Some(group) => group.issues.push(issue),
            None => self.links.push(LinkGroup {
                label,
                issues: vec![issue],
            }),
        }
    }

    /// Records a skipped entry.
    pub fn warn(&mut self, source_field: &'static str, index: usize, reason: impl Into<String>) {
        self.warnings.push(ResolutionWarning {
            source_field,
            index,
            reason: reason.into(),
        });
    }
}

fn resolve_link(entry: &Value) -> std::result::Result<RelatedIssue, String> {
    let outward = present(entry.get("outwardIssue"));
    let inward = present(entry.get("inwardIssue"));
    let (direction, stub) = match (outward, inward) {
        (Some(stub), None) => (Direction::Outward, stub),
        (None, Some(stub)) => (Direction::Inward, stub),
        (Some(_), Some(_)) => {
            return Err("link has both inward and outward issues".to_string());
        }
        (None, None) => return Err("link has neither inward nor outward issue".to_string()),
    };

    let link_type = entry.get("type");
    let side_label = text_of(link_type.and_then(|t| t.get(direction.as_str())));
    let label = if side_label.trim().is_empty() {
        text_of(link_type.and_then(|t| t.get("name")))
    } else {
        side_label
    };
    let label = label.trim().to_string();
    if label.is_empty() {
        return Err("link type has no label".to_string());
    }

    RelatedIssue::from_stub(stub, Relationship::Link { direction, label })
        .ok_or_else(|| format!("{} issue has no key", direction))
}

fn resolve_web_link(entry: &Value) -> Option<WebLink> {
    let object = entry.get("object");
    let url = text_of(object.and_then(|o| o.get("url")));
    if url.trim().is_empty() {
        return None;
    }
    let relationship = text_of(entry.get("relationship"));
    Some(WebLink {
        url,
        title: text_of(object.and_then(|o| o.get("title"))),
        relationship: if relationship.trim().is_empty() {
            DEFAULT_WEB_LINK_RELATIONSHIP.to_string()
        } else {
            relationship
        },
    })
}

#[cfg(test)]
#[path = "relation_tests.rs"]
mod tests;
