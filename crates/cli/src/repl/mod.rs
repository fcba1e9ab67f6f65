//! Interactive session: read a line, run it, print the result, repeat.
//!
//! Lines have the form `command name=value ...`. Command failures are printed
//! and the session continues; only end of input stops it.

pub mod editor;
pub mod input;

use std::io::Write;

use log::{debug, info};
use rust_verbs_core::command_definitions::CommandSource;
use rust_verbs_core::error::Result;
use rust_verbs_core::execution::execute;
use rust_verbs_core::line_parsing::parse_line;
use rust_verbs_core::registry::Registry;

use crate::output::render;
use crate::suggestions::suggestion_line;
pub use input::{BufferedInput, LineSource, ReadOutcome, TerminalInput};

pub struct Repl<'a> {
    registry: &'a Registry,
    sources: &'a [Box<dyn CommandSource>],
    prompt: String,
}

impl<'a> Repl<'a> {
    pub fn new(
        registry: &'a Registry,
        sources: &'a [Box<dyn CommandSource>],
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            sources,
            prompt: prompt.into(),
        }
    }

    /// Runs until `input` reports end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<W: Write>(&self, input: &mut dyn LineSource, out: &mut W) -> Result<()> {
        info!("Starting REPL with {} commands", self.registry.len());

        loop {
            match input.read_line(&self.prompt)? {
                ReadOutcome::Line(line) => self.handle_line(&line, out)?,
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => break,
            }
        }

        debug!("REPL input ended");
        Ok(())
    }

    /// Runs one line and writes its result or error to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> Result<()> {
        let Some(parsed) = parse_line(line) else {
            return Ok(());
        };

        if !self.registry.contains(&parsed.command) {
            writeln!(out, "Unknown command: {}", parsed.command)?;
            if let Some(suggestion) = suggestion_line(self.registry, &parsed.command) {
                writeln!(out, "{suggestion}")?;
            }
            return Ok(());
        }

        for token in &parsed.rejected {
            writeln!(out, "Invalid argument format: {token}")?;
        }

        match execute(
            self.registry,
            self.sources,
            &parsed.command,
            &parsed.raw_arguments(),
        ) {
            Ok(outcome) => {
                if let Some(text) = render(&outcome) {
                    writeln!(out, "{text}")?;
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }

        Ok(())
    }
}
