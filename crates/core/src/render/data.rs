// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured-data (JSON) renderer.

use serde::Serialize;

use super::{Document, IssueView, Renderer};
use crate::error::Result;
use crate::tree::{FieldTree, Node};

pub struct DataRenderer;

/// Top-level object; the single key matches the markup root element.
#[derive(Serialize)]
struct Envelope<'a> {
    issue: &'a Node,
}

impl Renderer for DataRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, view: &IssueView<'_>) -> Result<Document> {
        let tree = FieldTree::build(view.issue, view.relations);
        let mut content = serde_json::to_string_pretty(&Envelope { issue: tree.root() })?;
        content.push('\n');
        Ok(Document {
            content,
            extension: self.extension(),
        })
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
