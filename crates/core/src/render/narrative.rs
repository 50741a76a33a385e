// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable (Markdown) renderer.
//!
//! Sections follow the structured formats' order. Unlike them, a section
//! or line with nothing to show is left out entirely. A related issue's
//! details are printed under its first listing only.

use super::{Document, IssueView, Renderer};
use crate::error::Result;
use crate::issue::{format_timestamp, CanonicalIssue, Comment, Person};
use crate::relation::{RelatedIssue, Relations, WebLink};

pub struct NarrativeRenderer;

impl Renderer for NarrativeRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, view: &IssueView<'_>) -> Result<Document> {
        let mut content = render_issue(view.issue, view.relations).join("\n");
        content.push('\n');
        Ok(Document {
            content,
            extension: self.extension(),
        })
    }
}

fn render_issue(issue: &CanonicalIssue, relations: &Relations) -> Vec<String> {
    let mut lines = vec![title(issue)];

    section(&mut lines, "Details", details(issue));
    section(&mut lines, "People", people(issue));
    section(&mut lines, "Dates", dates(issue));
    section(&mut lines, "Labels", bullets(&issue.labels));
    section(&mut lines, "Components", bullets(&issue.components));
    section(&mut lines, "Description", text_block(&issue.description));
    section(&mut lines, "Comments", comments(&issue.comments));
    section(&mut lines, "Web Links", web_links(&relations.web_links));
    section(&mut lines, "Related Issues", related(relations));

    lines
}

/// Appends `## heading` and its body, unless the body is empty.
fn section(lines: &mut Vec<String>, heading: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("## {}", heading));
    lines.push(String::new());
    lines.extend(body);
}

fn title(issue: &CanonicalIssue) -> String {
    if issue.summary.is_empty() {
        format!("# {}", issue.key)
    } else {
        format!("# {} - {}", issue.key, issue.summary)
    }
}

fn field(lines: &mut Vec<String>, name: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("- **{}:** {}", name, value));
    }
}

fn details(issue: &CanonicalIssue) -> Vec<String> {
    let mut lines = Vec::new();
    field(&mut lines, "Type", &issue.issue_type);
    field(&mut lines, "Status", &issue.status);
    field(&mut lines, "Priority", &issue.priority);
    lines
}

fn person_label(person: &Person) -> String {
    if person.id.is_empty() || person.id == person.display_name {
        person.display_name.clone()
    } else {
        format!("{} ({})", person.display_name, person.id)
    }
}

fn people(issue: &CanonicalIssue) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(assignee) = &issue.assignee {
        field(&mut lines, "Assignee", &person_label(assignee));
    }
    if let Some(reporter) = &issue.reporter {
        field(&mut lines, "Reporter", &person_label(reporter));
    }
    lines
}

fn dates(issue: &CanonicalIssue) -> Vec<String> {
    let mut lines = Vec::new();
    field(&mut lines, "Created", &format_timestamp(issue.created.as_ref()));
    field(&mut lines, "Updated", &format_timestamp(issue.updated.as_ref()));
    lines
}

fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|item| format!("- {}", item)).collect()
}

fn text_block(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.lines().map(str::to_string).collect()
}

fn comments(comments: &[Comment]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, comment) in comments.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let created = format_timestamp(comment.created.as_ref());
        if created.is_empty() {
            lines.push(format!("### {}", person_label(&comment.author)));
        } else {
            lines.push(format!("### {} - {}", person_label(&comment.author), created));
        }
        if comment.updated.is_some() {
            lines.push(format!(
                "_Updated: {}_",
                format_timestamp(comment.updated.as_ref())
            ));
        }
        lines.push(String::new());
        lines.extend(text_block(&comment.body));
    }
    lines
}

fn web_links(links: &[WebLink]) -> Vec<String> {
    links
        .iter()
        .map(|link| {
            let target = if link.title.is_empty() {
                format!("<{}>", link.url)
            } else {
                format!("[{}]({})", link.title, link.url)
            };
            if link.relationship.is_empty() {
                format!("- {}", target)
            } else {
                format!("- {} ({})", target, link.relationship)
            }
        })
        .collect()
}

fn related_line(issue: &RelatedIssue) -> String {
    let mut line = format!("- {}", issue.key);
    if !issue.summary.is_empty() {
        line.push_str(": ");
        line.push_str(&issue.summary);
    }
    let tags: Vec<&str> = [issue.status.as_str(), issue.issue_type.as_str()]
        .into_iter()
        .filter(|tag| !tag.is_empty())
        .collect();
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

/// Nested detail lines of a related issue, indented under its bullet.
fn related_details(issue: &RelatedIssue) -> Vec<String> {
    let mut lines = Vec::new();
    field(&mut lines, "Priority", &issue.priority);
    if let Some(assignee) = &issue.assignee {
        field(&mut lines, "Assignee", &person_label(assignee));
    }
    field(&mut lines, "Created", &format_timestamp(issue.created.as_ref()));
    field(&mut lines, "Updated", &format_timestamp(issue.updated.as_ref()));
    field(&mut lines, "Components", &issue.components.join(", "));
    field(&mut lines, "Labels", &issue.labels.join(", "));
    let mut lines: Vec<String> = lines.into_iter().map(|line| format!("  {}", line)).collect();
    for line in text_block(&issue.description) {
        if line.is_empty() {
            lines.push("  >".to_string());
        } else {
            lines.push(format!("  > {}", line));
        }
    }
    lines
}

fn subsection<'a>(
    lines: &mut Vec<String>,
    seen: &mut Vec<&'a str>,
    heading: &str,
    issues: impl IntoIterator<Item = &'a RelatedIssue>,
) {
    let mut body = Vec::new();
    for issue in issues {
        body.push(related_line(issue));
        if !seen.contains(&issue.key.as_str()) {
            seen.push(&issue.key);
            body.extend(related_details(issue));
        }
    }
    if body.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("### {}", heading));
    lines.push(String::new());
    lines.extend(body);
}

fn related(relations: &Relations) -> Vec<String> {
    let mut lines = Vec::new();
    // Keys whose details were already printed.
    let mut seen = Vec::new();
    subsection(&mut lines, &mut seen, "Subtasks", &relations.subtasks);
    subsection(&mut lines, &mut seen, "Parent", relations.parent.as_ref());
    subsection(&mut lines, &mut seen, "Child Issues", &relations.epic_children);
    for group in &relations.links {
        subsection(&mut lines, &mut seen, &group.label, &group.issues);
    }
    lines
}

#[cfg(test)]
#[path = "narrative_tests.rs"]
mod tests;
