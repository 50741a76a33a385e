// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for jex-core operations.

use thiserror::Error;

/// All errors that can stop an issue (or a whole batch) from exporting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required field: {field}\n  hint: every issue needs a key and an issue type")]
    MissingRequiredField { field: &'static str },

    #[error("malformed field {field}: '{value}' ({reason})")]
    MalformedField {
        field: String,
        value: String,
        reason: String,
    },

    #[error("unsupported format: '{0}'\n  hint: valid formats are: xml, json, markdown, raw")]
    UnsupportedFormat(String),

    #[error("failed to fetch {key}: {reason}")]
    Fetch { key: String, reason: String },

    #[error("{key} was already exported in this batch\n  hint: two requested keys resolve to the same issue")]
    DuplicateIssue { key: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-friendly name of the error kind, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingRequiredField { .. } => "MissingRequiredField",
            Error::MalformedField { .. } => "MalformedField",
            Error::UnsupportedFormat(_) => "UnsupportedFormat",
            Error::Fetch { .. } => "Fetch",
            Error::DuplicateIssue { .. } => "DuplicateIssue",
            Error::Io(_) => "Io",
            Error::Json(_) => "Json",
        }
    }
}

/// A specialized Result type for jex-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
