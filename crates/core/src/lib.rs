// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! jex-core: Jira issue normalization and export
//!
//! This crate turns raw tracker payloads into a canonical issue model,
//! resolves the issue's relationships, and renders the result as XML,
//! JSON, Markdown or the untouched response. The [`Exporter`] drives a
//! batch of keys through an [`IssueSource`].

pub mod error;
pub mod export;
pub mod issue;
pub mod paths;
pub mod raw;
pub mod relation;
pub mod render;
pub mod tree;

#[cfg(test)]
#[path = "testing.rs"]
pub(crate) mod testing;

pub use error::{Error, Result};
pub use export::{
    export_file_name, BatchSummary, ExportOutcome, Exported, Exporter, IssueSource, EPIC_ISSUE_TYPE,
};
pub use issue::{CanonicalIssue, Comment, Person};
pub use paths::FieldPaths;
pub use raw::RawIssue;
pub use relation::{
    belongs_to, Direction, LinkGroup, RelatedIssue, Relations, Relationship, ResolutionWarning,
    WebLink,
};
pub use render::{render, Document, Format, IssueView, Renderer};
pub use tree::FieldTree;
