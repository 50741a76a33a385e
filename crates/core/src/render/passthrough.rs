// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{Document, IssueView, Renderer};
use crate::error::Result;

/// Emits the tracker response exactly as it was received.
pub struct PassthroughRenderer;

impl Renderer for PassthroughRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, view: &IssueView<'_>) -> Result<Document> {
        Ok(Document {
            content: view.raw.body().to_string(),
            extension: self.extension(),
        })
    }
}

#[cfg(test)]
#[path = "passthrough_tests.rs"]
mod tests;
