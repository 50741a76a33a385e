// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration and credential resolution.
//!
//! Configuration is read from `$JEX_CONFIG`, which must name an existing
//! file, or else from `<config dir>/jex/config.toml` when present:
//! - `server`: Jira base URL used when none is given on the command line
//! - `user`: account email for basic auth
//! - `[fields] epic_link`: custom field holding the epic link (`""` disables)
//!
//! Credentials are resolved once, before any export, from explicit
//! arguments, the environment and this file.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use jex_core::FieldPaths;

use crate::env::{self, vars};
use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "jex";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Token value that asks for credentials from the environment.
pub const ENV_PLACEHOLDER: &str = "env";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: Option<String>,
    pub user: Option<String>,
    pub fields: FieldsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldsConfig {
    pub epic_link: Option<String>,
}

impl Config {
    /// Location of the config file under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Loads `$JEX_CONFIG` or the default config file.
    pub fn load_default() -> Result<Self> {
        Self::load_from(env::config_path(), Self::default_path())
    }

    /// Loads `explicit` when given, failing if it does not exist. Otherwise
    /// loads `fallback`, and a missing fallback yields the defaults.
    pub fn load_from(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::Config(format!(
                    "{}: no such file (named by {})",
                    path.display(),
                    vars::JEX_CONFIG
                )));
            }
            return Self::load(&path);
        }
        match fallback {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Field locations, with the configured epic-link field applied.
    pub fn field_paths(&self) -> FieldPaths {
        let paths = FieldPaths::default();
        match &self.fields.epic_link {
            Some(field) => paths.with_epic_link(Some(field.clone())),
            None => paths,
        }
    }
}

/// Credential values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CredentialArgs {
    pub server: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
}

/// Where the API token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Explicit,
    Environment,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Explicit => write!(f, "arguments"),
            CredentialSource::Environment => write!(f, "environment"),
        }
    }
}

/// Resolved basic-auth credentials for the tracker.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Normalized base URL, without a trailing slash.
    pub server: String,
    pub user: String,
    pub token: String,
    pub source: CredentialSource,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

fn given(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Credentials {
    /// Resolves credentials.
    ///
    /// The token comes from `--token` unless it is absent or the `env`
    /// placeholder, in which case `JIRA_API_TOKEN` is used. A token of the
    /// form `email:token` carries the user. Otherwise the user and server
    /// come from the arguments, then the environment, then `config`.
    ///
    /// `lookup` reads an environment variable; blank values must be `None`.
    pub fn resolve(
        args: &CredentialArgs,
        config: &Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let explicit = given(&args.token).filter(|t| !t.eq_ignore_ascii_case(ENV_PLACEHOLDER));
        let (source, token) = match explicit {
            Some(token) => (CredentialSource::Explicit, token),
            None => {
                let token = lookup(vars::JIRA_API_TOKEN).ok_or(Error::MissingCredential {
                    what: "API token",
                    hint: "pass --token or set JIRA_API_TOKEN",
                })?;
                (CredentialSource::Environment, token)
            }
        };

        let server = given(&args.server)
            .or_else(|| lookup(vars::JIRA_API_URL))
            .or_else(|| given(&config.server))
            .ok_or(Error::MissingCredential {
                what: "server URL",
                hint: "pass --server, set JIRA_API_URL, or add `server` to the config file",
            })?;

        let (embedded_user, token) = match token.split_once(':') {
            Some((user, token)) if !user.trim().is_empty() => {
                (Some(user.trim().to_string()), token.trim().to_string())
            }
            _ => (None, token),
        };
        if token.is_empty() {
            return Err(Error::MissingCredential {
                what: "API token",
                hint: "the token after `email:` is empty",
            });
        }

        let user = embedded_user
            .or_else(|| given(&args.user))
            .or_else(|| lookup(vars::JIRA_API_USER))
            .or_else(|| lookup(vars::JIRA_EMAIL))
            .or_else(|| given(&config.user))
            .ok_or(Error::MissingCredential {
                what: "user email",
                hint: "pass --user, use an email:token token, or set JIRA_API_USER",
            })?;

        Ok(Credentials {
            server: normalize_server(&server)?,
            user,
            token,
            source,
        })
    }
}

/// Strips trailing slashes and defaults the scheme to `https://`.
pub fn normalize_server(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(Error::InvalidServer(raw.to_string()));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{}", trimmed))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
