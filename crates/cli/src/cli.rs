// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "jex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export Jira issues as XML, JSON, Markdown or raw payloads")]
#[command(
    long_about = "Export Jira issues as XML, JSON, Markdown or raw payloads.\n\n\
    Each issue is normalized once (fields, comments, subtasks, parent, links and \
    web links) and written as <KEY>_export.<ext>."
)]
pub struct Cli {
    /// Log progress to stderr (JEX_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export issues in one format
    #[command(
        arg_required_else_help = true,
        after_help = "\
Examples:
  jex export PROJ-1                      Export PROJ-1 as PROJ-1_export.xml
  jex export PROJ-1,PROJ-2 -f markdown   Export two issues as Markdown
  jex export PROJ-1 -f json --stdout     Print JSON instead of writing a file
  jex export EPIC-7 --shallow            Use only what EPIC-7's own payload says
  jex export PROJ-1 --token env          Read credentials from JIRA_API_* variables
  jex export PROJ-1 --from saved/ -o out Re-render saved payloads offline"
    )]
    Export(ExportArgs),

    /// List supported export formats
    Formats {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Issue key(s) (comma-separated or repeated)
    #[arg(required = true, value_delimiter = ',', value_name = "KEYS")]
    pub keys: Vec<String>,

    /// Export format (xml, json, markdown, raw)
    #[arg(long, short = 'f', default_value = "xml")]
    pub format: String,

    /// Directory for exported files
    #[arg(long = "output-dir", short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print documents to stdout instead of writing files
    #[arg(long, conflicts_with = "output_dir")]
    pub stdout: bool,

    /// Skip fetching related issues' details and an epic's children
    #[arg(long)]
    pub shallow: bool,

    /// Read saved payloads (<KEY>.json) from a directory instead of Jira
    #[arg(long, value_name = "DIR", conflicts_with_all = ["server", "user", "token"])]
    pub from: Option<PathBuf>,

    /// Jira base URL (e.g. acme.atlassian.net)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Account email for basic auth
    #[arg(long, value_name = "EMAIL")]
    pub user: Option<String>,

    /// API token, `email:token`, or `env` to read JIRA_API_TOKEN
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
