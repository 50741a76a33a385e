// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue sources: the Jira REST API and a directory of saved payloads.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use jex_core::{belongs_to, Error, FieldPaths, IssueSource, RawIssue, Result};

use crate::config::Credentials;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ISSUE_API_PATH: &str = "/rest/api/2/issue";
const SEARCH_API_PATH: &str = "/rest/api/2/search";
const SEARCH_PAGE_SIZE: usize = 100;

/// `Authorization` header value for HTTP basic auth.
pub fn basic_auth(user: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, token)))
}

/// Rejects keys that could escape a URL path segment or a directory.
fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && key != "."
        && key != "..";
    if valid {
        Ok(())
    } else {
        Err(Error::Fetch {
            key: key.to_string(),
            reason: "invalid issue key".to_string(),
        })
    }
}

/// JQL for an epic's children under either linking scheme.
pub fn children_jql(key: &str) -> String {
    format!("parent = {} OR \"Epic Link\" = {}", key, key)
}

fn fetch_error(key: &str, reason: impl Into<String>) -> Error {
    Error::Fetch {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Blocking client for the Jira REST API (v2).
pub struct JiraClient {
    agent: ureq::Agent,
    server: String,
    authorization: String,
}

impl JiraClient {
    pub fn new(credentials: &Credentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("jex/", env!("CARGO_PKG_VERSION")))
            .build();
        JiraClient {
            agent,
            server: credentials.server.clone(),
            authorization: basic_auth(&credentials.user, &credentials.token),
        }
    }

    pub fn issue_url(&self, key: &str) -> String {
        format!("{}{}/{}", self.server, ISSUE_API_PATH, key)
    }

    pub fn remote_links_url(&self, key: &str) -> String {
        format!("{}/remotelink", self.issue_url(key))
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.server, SEARCH_API_PATH)
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> std::result::Result<String, String> {
        debug!("GET {}", url);
        let mut request = self
            .agent
            .get(url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json");
        for (name, value) in query {
            request = request.query(name, value);
        }
        let response = request.call();
        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| format!("failed to read response: {}", e)),
            Err(ureq::Error::Status(code, resp)) => {
                Err(format!("HTTP {} {}", code, resp.status_text()))
            }
            Err(ureq::Error::Transport(e)) => Err(e.to_string()),
        }
    }
}

impl IssueSource for JiraClient {
    fn fetch(&self, key: &str) -> Result<RawIssue> {
        check_key(key)?;
        let body = self
            .get(&self.issue_url(key), &[])
            .map_err(|reason| fetch_error(key, reason))?;
        let raw = RawIssue::parse(body)
            .map_err(|e| fetch_error(key, format!("invalid response: {}", e)))?;

        let remote_links = match self.get(&self.remote_links_url(key), &[]) {
            Ok(body) => parse_remote_links(key, &body),
            Err(reason) => {
                warn!("{}: remote links unavailable: {}", key, reason);
                Vec::new()
            }
        };
        Ok(raw.with_remote_links(remote_links))
    }

    /// Pages through `/search` until every match is read.
    fn children(&self, key: &str, _paths: &FieldPaths) -> Result<Vec<RawIssue>> {
        check_key(key)?;
        let jql = children_jql(key);
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let mut children = Vec::new();
        loop {
            let start_at = children.len().to_string();
            let query = [
                ("jql", jql.as_str()),
                ("startAt", start_at.as_str()),
                ("maxResults", page_size.as_str()),
            ];
            let body = self
                .get(&self.search_url(), &query)
                .map_err(|reason| fetch_error(key, reason))?;
            let page: SearchPage = serde_json::from_str(&body)
                .map_err(|e| fetch_error(key, format!("invalid search response: {}", e)))?;

            let received = page.issues.len();
            children.extend(page.issues.into_iter().map(RawIssue::from_value));
            if received == 0 || children.len() >= page.total {
                break;
            }
        }
        Ok(children)
    }
}

/// One page of a `/search` response.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    issues: Vec<Value>,
    #[serde(default)]
    total: usize,
}

/// Reads saved payloads: `<dir>/<KEY>.json` plus an optional
/// `<dir>/<KEY>.remotelinks.json`.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirSource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn issue_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn remote_links_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.remotelinks.json", key))
    }
}

impl IssueSource for DirSource {
    fn fetch(&self, key: &str) -> Result<RawIssue> {
        check_key(key)?;
        let path = self.issue_path(key);
        let body = fs::read_to_string(&path)
            .map_err(|e| fetch_error(key, format!("{}: {}", path.display(), e)))?;
        let raw = RawIssue::parse(body)
            .map_err(|e| fetch_error(key, format!("{}: {}", path.display(), e)))?;

        let links_path = self.remote_links_path(key);
        let remote_links = match fs::read_to_string(&links_path) {
            Ok(body) => parse_remote_links(key, &body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("{}: cannot read {}: {}", key, links_path.display(), e);
                Vec::new()
            }
        };
        Ok(raw.with_remote_links(remote_links))
    }

    /// Scans every saved payload, in file-name order, for issues naming
    /// `key` as their parent or epic link.
    fn children(&self, key: &str, paths: &FieldPaths) -> Result<Vec<RawIssue>> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| fetch_error(key, format!("{}: {}", self.dir.display(), e)))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_issue_file(path))
            .collect();
        files.sort();

        let mut children = Vec::new();
        for path in files {
            let parsed = fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(RawIssue::parse);
            match parsed {
                Ok(raw) if belongs_to(&raw, paths, key) => children.push(raw),
                Ok(_) => {}
                Err(e) => debug!("skipping {}: {}", path.display(), e),
            }
        }
        Ok(children)
    }
}

/// `<KEY>.json`, not `<KEY>.remotelinks.json`.
fn is_issue_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.ends_with(".json") && !name.ends_with(".remotelinks.json")
}

/// Parses a remote-link response (a JSON array). Anything else is
/// logged and treated as no links.
fn parse_remote_links(key: &str, body: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(links)) => links,
        Ok(_) => {
            warn!("{}: remote links response is not an array", key);
            Vec::new()
        }
        Err(e) => {
            warn!("{}: invalid remote links response: {}", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
