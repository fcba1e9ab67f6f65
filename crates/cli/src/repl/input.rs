use std::io::{stdout, BufRead, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use log::debug;
use rust_verbs_core::completion::Completer;
use rust_verbs_core::error::Result;
use rust_verbs_core::registry::Registry;

use super::editor::{KeyOutcome, LineEditor};

/// Result of waiting for one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The line was abandoned (Ctrl-C); prompt again.
    Interrupted,
    /// No more input (Ctrl-D or end of stream).
    Eof,
}

/// Somewhere the REPL reads lines from.
pub trait LineSource {
    /// Blocks until a line is entered, the line is abandoned, or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying input fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Plain line reading, for piped input and tests. The prompt is not shown.
pub struct BufferedInput<R> {
    reader: R,
}

impl<R: BufRead> BufferedInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufferedInput<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(ReadOutcome::Eof);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(ReadOutcome::Line(trimmed.to_string()))
    }
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// Raw-mode line editor with tab completion and in-memory history.
pub struct TerminalInput<'a> {
    completer: Completer<'a>,
    history: Vec<String>,
}

impl<'a> TerminalInput<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            completer: Completer::new(registry),
            history: Vec::new(),
        }
    }

    fn remember(&mut self, line: &str) {
        if line.trim().is_empty() || self.history.last().is_some_and(|last| last == line) {
            return;
        }
        self.history.push(line.to_string());
    }
}

fn redraw(prompt: &str, editor: &LineEditor) -> Result<()> {
    let mut stdout = stdout();
    let column = prompt.chars().count() + editor.cursor();

    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(prompt),
        Print(editor.text()),
        MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX))
    )?;
    stdout.flush()?;
    Ok(())
}

impl LineSource for TerminalInput<'_> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        enable_raw_mode()?;
        let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode is disabled

        let mut editor = LineEditor::new();
        redraw(prompt, &editor)?;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };

            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            match editor.handle_key(key_event, &self.completer, &self.history) {
                KeyOutcome::Redraw => redraw(prompt, &editor)?,
                KeyOutcome::Bell => execute!(stdout(), Print("\x07"))?,
                KeyOutcome::Candidates(candidates) => {
                    execute!(stdout(), Print("\r\n"), Print(candidates.join("  ")), Print("\r\n"))?;
                    redraw(prompt, &editor)?;
                }
                KeyOutcome::Submit(line) => {
                    execute!(stdout(), Print("\r\n"))?;
                    self.remember(&line);
                    return Ok(ReadOutcome::Line(line));
                }
                KeyOutcome::Interrupted => {
                    execute!(stdout(), Print("^C\r\n"))?;
                    debug!("Line discarded");
                    return Ok(ReadOutcome::Interrupted);
                }
                KeyOutcome::EndOfInput => {
                    execute!(stdout(), Print("\r\n"))?;
                    return Ok(ReadOutcome::Eof);
                }
            }
        }
    }
}
