// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared intermediate field tree.
//!
//! The markup and data renderers both walk a [`FieldTree`] mechanically,
//! which keeps the two formats field-for-field identical. The tree fixes
//! section order, field names and the element names used for list items.
//!
//! Related issues appear as plain key lists per category (`subtasks`,
//! `parent`, `epic_children`, `links.<label>`). Their fields live once in
//! `related_issues/details`, keyed by issue key.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::issue::{format_timestamp, CanonicalIssue, Comment, Person};
use crate::relation::{RelatedIssue, Relations, WebLink};

/// One node of the field tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A scalar value (possibly empty).
    Text(String),
    /// Fixed set of named fields, in schema order.
    Record(Vec<(&'static str, Node)>),
    /// Data-dependent keys (e.g. link labels). In markup each entry is an
    /// `entry` element whose `attr` attribute holds the key.
    Map {
        entry: &'static str,
        attr: &'static str,
        entries: Vec<(String, Node)>,
    },
    /// Ordered items, each named `item` in markup.
    List { item: &'static str, items: Vec<Node> },
}

impl Node {
    fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    fn list(item: &'static str, items: impl IntoIterator<Item = Node>) -> Self {
        Node::List {
            item,
            items: items.into_iter().collect(),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Text(value) => serializer.serialize_str(value),
            Node::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, node) in fields {
                    map.serialize_entry(name, node)?;
                }
                map.end()
            }
            Node::Map { entries, .. } => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, node) in entries {
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
            Node::List { items, .. } => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for node in items {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
        }
    }
}

/// A scalar leaf of the tree with its slash-separated location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub path: String,
    pub value: &'a str,
}

/// The ordered field tree of one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTree {
    root: Node,
}

impl FieldTree {
    /// Name of the document root in every structured format.
    pub const ROOT: &'static str = "issue";

    pub fn build(issue: &CanonicalIssue, relations: &Relations) -> Self {
        let root = Node::Record(vec![
            (
                "identity",
                Node::Record(vec![
                    ("key", Node::text(&issue.key)),
                    ("summary", Node::text(&issue.summary)),
                    ("type", Node::text(&issue.issue_type)),
                    ("status", Node::text(&issue.status)),
                    ("priority", Node::text(&issue.priority)),
                ]),
            ),
            (
                "people",
                Node::Record(vec![
                    ("assignee", person_node(issue.assignee.as_ref())),
                    ("reporter", person_node(issue.reporter.as_ref())),
                ]),
            ),
            (
                "dates",
                Node::Record(vec![
                    ("created", Node::text(format_timestamp(issue.created.as_ref()))),
                    ("updated", Node::text(format_timestamp(issue.updated.as_ref()))),
                ]),
            ),
            (
                "classification",
                Node::Record(vec![
                    ("labels", Node::list("label", issue.labels.iter().map(Node::text))),
                    (
                        "components",
                        Node::list("component", issue.components.iter().map(Node::text)),
                    ),
                ]),
            ),
            ("description", Node::text(&issue.description)),
            (
                "comments",
                Node::list("comment", issue.comments.iter().map(comment_node)),
            ),
            (
                "web_links",
                Node::list("link", relations.web_links.iter().map(web_link_node)),
            ),
            ("related_issues", related_node(relations)),
        ]);
        FieldTree { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Every scalar leaf in document order, e.g. `identity/key`.
    pub fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut out = Vec::new();
        collect_leaves(&self.root, String::new(), &mut out);
        out
    }
}

fn child_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", path, segment)
    }
}

fn collect_leaves<'a>(node: &'a Node, path: String, out: &mut Vec<Leaf<'a>>) {
    match node {
        Node::Text(value) => out.push(Leaf {
            path,
            value: value.as_str(),
        }),
        Node::Record(fields) => {
            for (name, child) in fields {
                collect_leaves(child, child_path(&path, name), out);
            }
        }
        Node::Map { entries, .. } => {
            for (key, child) in entries {
                collect_leaves(child, child_path(&path, key), out);
            }
        }
        Node::List { items, .. } => {
            for (i, child) in items.iter().enumerate() {
                collect_leaves(child, child_path(&path, &i.to_string()), out);
            }
        }
    }
}

fn person_node(person: Option<&Person>) -> Node {
    let (name, id) = person
        .map(|p| (p.display_name.as_str(), p.id.as_str()))
        .unwrap_or_default();
    Node::Record(vec![("name", Node::text(name)), ("id", Node::text(id))])
}

fn comment_node(comment: &Comment) -> Node {
    Node::Record(vec![
        ("author", person_node(Some(&comment.author))),
        ("body", Node::text(&comment.body)),
        ("created", Node::text(format_timestamp(comment.created.as_ref()))),
        ("updated", Node::text(format_timestamp(comment.updated.as_ref()))),
    ])
}

fn web_link_node(link: &WebLink) -> Node {
    Node::Record(vec![
        ("url", Node::text(&link.url)),
        ("title", Node::text(&link.title)),
        ("relationship", Node::text(&link.relationship)),
    ])
}

fn related_keys<'a>(issues: impl IntoIterator<Item = &'a RelatedIssue>) -> Node {
    Node::list("key", issues.into_iter().map(|issue| Node::text(&issue.key)))
}

fn related_details_node(issue: &RelatedIssue) -> Node {
    Node::Record(vec![
        ("summary", Node::text(&issue.summary)),
        ("type", Node::text(&issue.issue_type)),
        ("status", Node::text(&issue.status)),
        ("priority", Node::text(&issue.priority)),
        ("assignee", person_node(issue.assignee.as_ref())),
        ("created", Node::text(format_timestamp(issue.created.as_ref()))),
        ("updated", Node::text(format_timestamp(issue.updated.as_ref()))),
        ("description", Node::text(&issue.description)),
        (
            "components",
            Node::list("component", issue.components.iter().map(Node::text)),
        ),
        ("labels", Node::list("label", issue.labels.iter().map(Node::text))),
    ])
}

fn related_node(relations: &Relations) -> Node {
    let mut details: Vec<(String, Node)> = Vec::new();
    for issue in relations.related() {
        if !details.iter().any(|(key, _)| key == &issue.key) {
            details.push((issue.key.clone(), related_details_node(issue)));
        }
    }

    Node::Record(vec![
        ("subtasks", related_keys(&relations.subtasks)),
        ("parent", related_keys(&relations.parent)),
        ("epic_children", related_keys(&relations.epic_children)),
        (
            "links",
            Node::Map {
                entry: "group",
                attr: "label",
                entries: relations
                    .links
                    .iter()
                    .map(|group| (group.label.clone(), related_keys(&group.issues)))
                    .collect(),
            },
        ),
        (
            "details",
            Node::Map {
                entry: "issue",
                attr: "key",
                entries: details,
            },
        ),
    ])
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
