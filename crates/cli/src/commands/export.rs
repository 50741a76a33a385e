// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use jex_core::{BatchSummary, Exporter, FieldPaths, Format, IssueSource};
use tracing::info;

use crate::cli::ExportArgs;
use crate::client::{DirSource, JiraClient};
use crate::config::{Config, CredentialArgs, Credentials};
use crate::env;
use crate::error::{Error, Result};

pub fn run(args: ExportArgs) -> Result<()> {
    // A bad format fails before config, credentials or any fetch.
    let format: Format = args.format.parse()?;
    let config = Config::load_default()?;
    let paths = config.field_paths();

    let source: Box<dyn IssueSource> = match &args.from {
        Some(dir) => {
            info!("reading saved payloads from {}", dir.display());
            Box::new(DirSource::new(dir))
        }
        None => {
            let credential_args = CredentialArgs {
                server: args.server.clone(),
                user: args.user.clone(),
                token: args.token.clone(),
            };
            let credentials = Credentials::resolve(&credential_args, &config, env::lookup)?;
            info!(
                "connecting to {} as {} (token from {})",
                credentials.server, credentials.user, credentials.source
            );
            Box::new(JiraClient::new(&credentials))
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_impl(source.as_ref(), &paths, &args, format, &mut out).map(|_| ())
}

/// Internal implementation that accepts the source and writer for testing.
pub(crate) fn run_impl(
    source: &dyn IssueSource,
    paths: &FieldPaths,
    args: &ExportArgs,
    format: Format,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    let mut exporter = Exporter::new(source, paths).expand_related(!args.shallow);
    if !args.stdout {
        exporter = exporter.write_to(&args.output_dir);
    }
    let outcomes = exporter.export_format(&args.keys, format);

    for outcome in &outcomes {
        match &outcome.result {
            Ok(exported) => match &exported.path {
                Some(path) => writeln!(out, "Exported {} to {}", exported.key, path.display())?,
                None => write!(out, "{}", exported.document.content)?,
            },
            Err(e) => eprintln!("error: {}: {}", outcome.key, e),
        }
    }

    let summary = BatchSummary::of(&outcomes);
    if summary.exported == 0 {
        return Err(Error::NothingExported {
            failed: summary.failed,
        });
    }
    if summary.failed > 0 {
        eprintln!(
            "{} of {} issue(s) exported, {} failed",
            summary.exported,
            summary.total(),
            summary.failed
        );
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
