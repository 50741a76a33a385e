// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Batch export driver.
//!
//! Runs fetch, build, resolve and render for each requested key in
//! order. A failing key yields an error outcome and the batch moves on;
//! only an unknown format stops the batch, before anything is fetched.
//!
//! With [`Exporter::expand_related`], each related issue is fetched for
//! its full details and an epic's children are searched for. Lookups that
//! fail are logged and leave the embedded stub in place.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::issue::CanonicalIssue;
use crate::paths::FieldPaths;
use crate::raw::RawIssue;
use crate::relation::{RelatedIssue, Relations, Relationship, ResolutionWarning};
use crate::render::{self, Document, Format, IssueView};

/// Issue type whose children are searched for when expanding.
pub const EPIC_ISSUE_TYPE: &str = "Epic";

/// Where raw issues come from.
pub trait IssueSource {
    fn fetch(&self, key: &str) -> Result<RawIssue>;

    /// Issues whose parent or epic link is `key`, in the source's order.
    ///
    /// Sources that cannot search report no children.
    fn children(&self, _key: &str, _paths: &FieldPaths) -> Result<Vec<RawIssue>> {
        Ok(Vec::new())
    }
}

/// A successfully exported issue.
#[derive(Debug, Clone)]
pub struct Exported {
    /// Canonical key as read from the payload.
    pub key: String,
    pub format: Format,
    pub document: Document,
    /// Written file, when exporting to a directory.
    pub path: Option<PathBuf>,
    pub warnings: Vec<ResolutionWarning>,
}

/// Result for one requested key.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Key as requested.
    pub key: String,
    pub result: Result<Exported>,
}

impl ExportOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Success and failure counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub exported: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of(outcomes: &[ExportOutcome]) -> Self {
        let exported = outcomes.iter().filter(|o| o.is_ok()).count();
        BatchSummary {
            exported,
            failed: outcomes.len() - exported,
        }
    }

    pub fn total(&self) -> usize {
        self.exported + self.failed
    }
}

/// File name for an exported document: `<key>_export.<extension>`.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced with `_`.
pub fn export_file_name(key: &str, format: Format) -> String {
    let safe: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_export.{}", safe, format.extension())
}

pub struct Exporter<'a> {
    source: &'a dyn IssueSource,
    paths: &'a FieldPaths,
    output_dir: Option<PathBuf>,
    expand: bool,
}

impl<'a> Exporter<'a> {
    pub fn new(source: &'a dyn IssueSource, paths: &'a FieldPaths) -> Self {
        Exporter {
            source,
            paths,
            output_dir: None,
            expand: false,
        }
    }

    /// Looks up related issues' details and an epic's children.
    pub fn expand_related(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Writes each document into `dir` (created on demand).
    pub fn write_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Exports every non-blank key in order.
    ///
    /// Fails as a whole only when `format` is not a known identifier.
    pub fn export<S: AsRef<str>>(&self, keys: &[S], format: &str) -> Result<Vec<ExportOutcome>> {
        let format: Format = format.parse()?;
        Ok(self.export_format(keys, format))
    }

    /// Exports every non-blank key in order, in an already parsed format.
    ///
    /// A key whose issue was already exported earlier in the batch (for
    /// example `proj-1` after `PROJ-1`) fails with
    /// [`Error::DuplicateIssue`] instead of overwriting the first file.
    pub fn export_format<S: AsRef<str>>(&self, keys: &[S], format: Format) -> Vec<ExportOutcome> {
        let mut exported_keys = HashSet::new();
        keys.iter()
            .map(|key| key.as_ref().trim())
            .filter(|key| !key.is_empty())
            .map(|key| {
                let result = self.render_one(key, format).and_then(|mut exported| {
                    if !exported_keys.insert(exported.key.clone()) {
                        return Err(Error::DuplicateIssue { key: exported.key });
                    }
                    self.write(&mut exported)?;
                    Ok(exported)
                });
                if let Err(e) = &result {
                    warn!("{}: export failed: {}", key, e);
                }
                ExportOutcome {
                    key: key.to_string(),
                    result,
                }
            })
            .collect()
    }

    /// Fetches and renders a single issue.
    pub fn export_one(&self, key: &str, format: Format) -> Result<Exported> {
        let mut exported = self.render_one(key, format)?;
        self.write(&mut exported)?;
        Ok(exported)
    }

    fn render_one(&self, key: &str, format: Format) -> Result<Exported> {
        debug!("fetching {}", key);
        let raw = self.source.fetch(key)?;
        let issue = CanonicalIssue::from_raw(&raw, self.paths)?;
        let mut relations = Relations::resolve(&raw, self.paths);
        if self.expand {
            self.expand(&issue, &mut relations);
        }
        for warning in &relations.warnings {
            warn!("{}: {}", issue.key, warning);
        }

        let view = IssueView {
            issue: &issue,
            relations: &relations,
            raw: &raw,
        };
        let document = render::render(format, &view)?;

        Ok(Exported {
            key: issue.key,
            format,
            document,
            path: None,
            warnings: relations.warnings,
        })
    }

    fn write(&self, exported: &mut Exported) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            exported.path = Some(write_document(
                dir,
                &exported.key,
                exported.format,
                &exported.document,
            )?);
        }
        info!("exported {} as {}", exported.key, exported.format);
        Ok(())
    }

    fn expand(&self, issue: &CanonicalIssue, relations: &mut Relations) {
        if issue.issue_type.eq_ignore_ascii_case(EPIC_ISSUE_TYPE) {
            self.add_epic_children(issue, relations);
        }

        // Children come from a search and already carry their details.
        let mut details: HashMap<String, Option<CanonicalIssue>> = HashMap::new();
        for related in relations.related_mut() {
            if related.relationship == Relationship::EpicChild {
                continue;
            }
            let found = details
                .entry(related.key.clone())
                .or_insert_with(|| self.lookup(&issue.key, &related.key));
            if let Some(full) = found {
                related.fill_details(full);
            }
        }
    }

    fn add_epic_children(&self, issue: &CanonicalIssue, relations: &mut Relations) {
        let children = match self.source.children(&issue.key, self.paths) {
            Ok(children) => children,
            Err(e) => {
                warn!("{}: epic children unavailable: {}", issue.key, e);
                return;
            }
        };
        for (index, raw) in children.iter().enumerate() {
            match CanonicalIssue::from_raw(raw, self.paths) {
                Ok(child) if child.key == issue.key => {}
                Ok(child) => relations
                    .epic_children
                    .push(RelatedIssue::from_issue(&child, Relationship::EpicChild)),
                Err(e) => relations.warn("children", index, e.to_string()),
            }
        }
        debug!("{}: {} epic children", issue.key, relations.epic_children.len());
    }

    fn lookup(&self, issue_key: &str, related_key: &str) -> Option<CanonicalIssue> {
        let full = self
            .source
            .fetch(related_key)
            .and_then(|raw| CanonicalIssue::from_raw(&raw, self.paths));
        match full {
            Ok(full) => Some(full),
            Err(e) => {
                warn!("{}: details of {} unavailable: {}", issue_key, related_key, e);
                None
            }
        }
    }
}

fn write_document(dir: &Path, key: &str, format: Format, document: &Document) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(key, format));
    fs::write(&path, &document.content)?;
    Ok(path)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
