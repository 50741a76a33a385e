// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use jex_core::Format;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

#[derive(Serialize)]
struct FormatInfo {
    name: &'static str,
    extension: &'static str,
    media_type: &'static str,
    description: &'static str,
}

impl From<Format> for FormatInfo {
    fn from(format: Format) -> Self {
        FormatInfo {
            name: format.as_str(),
            extension: format.extension(),
            media_type: format.media_type(),
            description: format.description(),
        }
    }
}

pub fn run(output: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_impl(output, &mut out)
}

pub(crate) fn run_impl(output: OutputFormat, out: &mut impl Write) -> Result<()> {
    let formats: Vec<FormatInfo> = Format::ALL.into_iter().map(FormatInfo::from).collect();
    match output {
        OutputFormat::Text => {
            for info in &formats {
                writeln!(
                    out,
                    "{:<10} .{:<6} {:<18} {}",
                    info.name, info.extension, info.media_type, info.description
                )?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&formats)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "formats_tests.rs"]
mod tests;
