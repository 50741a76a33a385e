// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the jexrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] jex_core::Error),

    #[error("missing {what}\n  hint: {hint}")]
    MissingCredential {
        what: &'static str,
        hint: &'static str,
    },

    #[error("invalid server URL: '{0}'")]
    InvalidServer(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("nothing exported: {failed} issue(s) failed")]
    NothingExported { failed: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for jexrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
