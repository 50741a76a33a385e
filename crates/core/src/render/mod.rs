// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formats and their renderers.
//!
//! Every renderer consumes the same [`IssueView`] and returns a
//! [`Document`] with the text and file extension for its format.

mod data;
mod markup;
mod narrative;
mod passthrough;

pub use data::DataRenderer;
pub use markup::MarkupRenderer;
pub use narrative::NarrativeRenderer;
pub use passthrough::PassthroughRenderer;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::CanonicalIssue;
use crate::raw::RawIssue;
use crate::relation::Relations;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Structured markup (XML).
    Markup,
    /// Structured data (JSON).
    Data,
    /// Human-readable narrative (Markdown).
    Narrative,
    /// The tracker's response, untouched.
    Raw,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Markup, Format::Data, Format::Narrative, Format::Raw];

    /// Identifier accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Markup => "xml",
            Format::Data => "json",
            Format::Narrative => "markdown",
            Format::Raw => "raw",
        }
    }

    /// File extension of exported documents (without the dot).
    pub fn extension(&self) -> &'static str {
        self.renderer().extension()
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Format::Markup => "application/xml",
            Format::Data => "application/json",
            Format::Narrative => "text/markdown",
            Format::Raw => "text/plain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Format::Markup => "XML document with one element per field",
            Format::Data => "JSON document mirroring the XML layout",
            Format::Narrative => "Markdown report for humans",
            Format::Raw => "Tracker response, verbatim",
        }
    }

    pub fn renderer(&self) -> &'static dyn Renderer {
        match self {
            Format::Markup => &MarkupRenderer,
            Format::Data => &DataRenderer,
            Format::Narrative => &NarrativeRenderer,
            Format::Raw => &PassthroughRenderer,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "xml" | "markup" => Ok(Format::Markup),
            "json" | "data" => Ok(Format::Data),
            "markdown" | "md" | "narrative" => Ok(Format::Narrative),
            "raw" | "passthrough" => Ok(Format::Raw),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Everything a renderer may look at for one issue.
#[derive(Debug, Clone, Copy)]
pub struct IssueView<'a> {
    pub issue: &'a CanonicalIssue,
    pub relations: &'a Relations,
    pub raw: &'a RawIssue,
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    /// File extension without the dot.
    pub extension: &'static str,
}

/// Converts one issue into one output encoding.
pub trait Renderer {
    /// File extension of produced documents (without the dot).
    fn extension(&self) -> &'static str;

    fn render(&self, view: &IssueView<'_>) -> Result<Document>;
}

/// Renders a view in the given format.
pub fn render(format: Format, view: &IssueView<'_>) -> Result<Document> {
    format.renderer().render(view)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
