// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! jexrs - command-line front end for jex-core.
//!
//! # Main Components
//!
//! - [`Cli`] - argument parsing for the `jex` binary
//! - [`config`] - config file loading and credential resolution
//! - [`client`] - issue sources backed by the Jira REST API or saved payloads
//! - [`Error`] - Error types for all operations

mod cli;
mod commands;
pub mod logging;

pub mod client;
pub mod config;
pub mod env;
pub mod error;

pub use cli::{Cli, Command, ExportArgs, OutputFormat};
pub use client::{DirSource, JiraClient};
pub use config::{Config, CredentialArgs, Credentials};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Export(args) => commands::export::run(args),
        Command::Formats { output } => commands::formats::run(output),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "jex", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
