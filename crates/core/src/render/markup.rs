// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured-markup (XML) renderer.
//!
//! Walks the field tree: records become nested elements, lists become
//! containers of item elements, and data-keyed maps become containers of
//! entry elements carrying the key as an attribute (`<group label="...">`,
//! `<issue key="...">`). Empty values and collections are kept as empty
//! elements so the schema never changes shape.

use std::fmt::Write;

use super::{Document, IssueView, Renderer};
use crate::error::Result;
use crate::tree::{FieldTree, Node};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";
const INDENT: &str = "  ";

pub struct MarkupRenderer;

impl Renderer for MarkupRenderer {
    fn extension(&self) -> &'static str {
        "xml"
    }

    fn render(&self, view: &IssueView<'_>) -> Result<Document> {
        let tree = FieldTree::build(view.issue, view.relations);
        let mut content = String::with_capacity(4096);
        content.push_str(XML_DECLARATION);
        content.push('\n');
        write_element(&mut content, FieldTree::ROOT, None, tree.root(), 0);
        Ok(Document {
            content,
            extension: self.extension(),
        })
    }
}

/// Writes `node` as element `name`. `attr` is the `(name, value)` pair
/// of a map entry's key.
fn write_element(
    out: &mut String,
    name: &str,
    attr: Option<(&str, &str)>,
    node: &Node,
    depth: usize,
) {
    let indent = INDENT.repeat(depth);
    let open = match attr {
        Some((attr, value)) => format!("{} {}=\"{}\"", name, attr, escape(value)),
        None => name.to_string(),
    };

    match node {
        Node::Text(value) if value.is_empty() => {
            let _ = writeln!(out, "{}<{}/>", indent, open);
        }
        Node::Text(value) => {
            let _ = writeln!(out, "{}<{}>{}</{}>", indent, open, escape(value), name);
        }
        Node::Record(fields) if fields.is_empty() => {
            let _ = writeln!(out, "{}<{}/>", indent, open);
        }
        Node::Record(fields) => {
            let _ = writeln!(out, "{}<{}>", indent, open);
            for (field, child) in fields {
                write_element(out, field, None, child, depth + 1);
            }
            let _ = writeln!(out, "{}</{}>", indent, name);
        }
        Node::Map { entries, .. } if entries.is_empty() => {
            let _ = writeln!(out, "{}<{}/>", indent, open);
        }
        Node::Map {
            entry,
            attr,
            entries,
        } => {
            let _ = writeln!(out, "{}<{}>", indent, open);
            for (key, child) in entries {
                write_element(out, entry, Some((attr, key)), child, depth + 1);
            }
            let _ = writeln!(out, "{}</{}>", indent, name);
        }
        Node::List { items, .. } if items.is_empty() => {
            let _ = writeln!(out, "{}<{}/>", indent, open);
        }
        Node::List { item, items } => {
            let _ = writeln!(out, "{}<{}>", indent, open);
            for child in items {
                write_element(out, item, None, child, depth + 1);
            }
            let _ = writeln!(out, "{}</{}>", indent, name);
        }
    }
}

/// Escapes text for element content and attribute values.
///
/// Reserved characters become entities; characters XML 1.0 cannot carry
/// are dropped. Carriage returns are encoded so parsers keep them.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(c),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
