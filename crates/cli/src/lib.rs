//! Rust Verbs CLI Library
//!
//! This crate exposes registered command sources on the command line and in
//! an interactive REPL.
//!
//! # Key Features
//!
//! - **Generated Subcommands**: Each registered command becomes a subcommand,
//!   each parameter a `--flag`
//! - **REPL**: `command name=value` lines with tab completion and history
//! - **Command Listing**: Every command and its arguments as YAML or JSON
//! - **Suggestions**: Unknown command names get a fuzzy "did you mean"
//!
//! # Architecture
//!
//! - [`cli_args`]: Global options
//! - [`arguments`]: Subcommand generation and reading matched flags
//! - [`repl`]: Line sources, the line editor and the session loop
//! - [`output`]: Rendering outcomes and the command listing
//!
//! # Examples
//!
//! ```bash
//! # Run a command
//! rv sum --a 2 --b 3
//!
//! # Boolean options are plain flags
//! rv test_path --path ./Cargo.toml --full-path
//!
//! # List commands as JSON
//! rv --list-commands --format json
//!
//! # Interactive session
//! rv --repl
//! ```

pub mod arguments;
pub mod cli_args;
pub mod output;
pub mod repl;
pub mod sample_commands;
pub mod suggestions;

use std::ffi::OsString;
use std::io::{stdin, stdout, Write};
use std::process::ExitCode;

use clap::FromArgMatches;
use crossterm::tty::IsTty;
use log::{debug, info, warn};
use rust_verbs_core::command_definitions::CommandSource;
use rust_verbs_core::config::Settings;
use rust_verbs_core::error::{Error, ExecutionError, Result};
use rust_verbs_core::execution::execute;
use rust_verbs_core::registry::Registry;
use rust_verbs_core::specs::{list_command_specs, Resolution};
use rust_verbs_core::{config, file_handling, registry};

use crate::arguments::{build_cli, selected_command, Selection};
use crate::cli_args::Args;
use crate::output::{render, render_specs};
use crate::repl::{BufferedInput, Repl, TerminalInput};
use crate::suggestions::suggestion_line;

/// Runs `rv` against `sources` with the process arguments.
///
/// Startup failures and command failures are printed to stderr and turn into
/// a failing exit code.
#[must_use]
pub fn run(sources: &[Box<dyn CommandSource>]) -> ExitCode {
    match run_from(sources, std::env::args_os(), &mut stdout(), &mut std::io::stderr()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Like [`run`], with explicit arguments and output streams.
///
/// Invalid arguments and `--help` are handled by clap, which exits the process.
///
/// # Errors
///
/// Returns an error if the registry cannot be built, the settings file cannot
/// be read, or writing output fails. A failing command is reported on `err`
/// and yields [`ExitCode::FAILURE`] instead.
pub fn run_from<I, T, W, E>(
    sources: &[Box<dyn CommandSource>],
    argv: I,
    out: &mut W,
    err: &mut E,
) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let registry = registry::build(sources)?;
    let matches = build_cli(&registry).get_matches_from(argv);
    let args = Args::from_arg_matches(&matches).map_err(|e| Error::Misc(e.to_string()))?;

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");
    let settings = file_handling::get_settings(&config_path)?;

    if args.list_commands {
        let format = args.format.unwrap_or(settings.list_format);
        let specs = list_command_specs(&registry, Resolution::Eager);
        writeln!(out, "{}", render_specs(&specs, format)?)?;
        return Ok(ExitCode::SUCCESS);
    }

    let selection = selected_command(&registry, &matches);

    if args.repl {
        if selection != Selection::None {
            warn!("Ignoring the command given alongside --repl");
        }
        start_repl(&registry, sources, &settings, out)?;
        return Ok(ExitCode::SUCCESS);
    }

    match selection {
        Selection::None => {
            write!(out, "{}", build_cli(&registry).render_help())?;
            Ok(ExitCode::SUCCESS)
        }
        Selection::Unknown(name) => {
            writeln!(err, "{}", ExecutionError::NotFound(name.clone()))?;
            if let Some(suggestion) = suggestion_line(&registry, &name) {
                writeln!(err, "{suggestion}")?;
            }
            Ok(ExitCode::FAILURE)
        }
        Selection::Command { name, arguments } => {
            match execute(&registry, sources, &name, &arguments) {
                Ok(outcome) => {
                    if let Some(text) = render(&outcome) {
                        writeln!(out, "{text}")?;
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    writeln!(err, "{e}")?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn start_repl<W: Write>(
    registry: &Registry,
    sources: &[Box<dyn CommandSource>],
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let repl = Repl::new(registry, sources, settings.prompt.clone());

    if stdin().is_tty() {
        repl.run(&mut TerminalInput::new(registry), out)
    } else {
        info!("Standard input is not a terminal, reading lines without completion");
        repl.run(&mut BufferedInput::new(stdin().lock()), out)
    }
}
