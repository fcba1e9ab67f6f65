//! Tokenizes one REPL line: `command (name=value)*`.
//!
//! A value may be double quoted to carry whitespace (`path="/tmp/some dir/"`);
//! the quotes are stripped and the embedded whitespace is kept verbatim.
//! Tokens that are not `name=value` are reported and skipped, they never
//! fail the whole line.

use std::iter::Peekable;
use std::str::Chars;

use indexmap::IndexMap;
use log::warn;

use crate::value::{RawArguments, RawValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: String,
    pub arguments: IndexMap<String, String>,
    /// Tokens that could not be read as `name=value`.
    pub rejected: Vec<String>,
}

impl ParsedLine {
    /// Arguments as raw string values, ready for the execution engine.
    #[must_use]
    pub fn raw_arguments(&self) -> RawArguments {
        self.arguments
            .iter()
            .map(|(name, value)| (name.clone(), RawValue::String(value.clone())))
            .collect()
    }
}

/// Splits a line into its command and arguments; `None` for a blank line.
#[must_use]
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    let mut parsed = ParsedLine {
        command: command.to_string(),
        arguments: IndexMap::new(),
        rejected: Vec::new(),
    };

    let mut chars = rest.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        match read_token(&mut chars) {
            Ok(token) => accept_token(&mut parsed, token),
            Err(token) => {
                warn!("Unterminated quote in argument: {token}");
                parsed.rejected.push(token);
            }
        }
    }

    Some(parsed)
}

/// Reads up to the next unquoted whitespace. `Err` carries an unterminated quoted token.
fn read_token(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    let mut token = String::new();
    let mut in_quotes = false;

    while let Some(&c) = chars.peek() {
        if !in_quotes && c.is_whitespace() {
            break;
        }
        chars.next();

        if c == '"' {
            if in_quotes {
                // Only a quote that ends the token closes the value.
                if chars.peek().map_or(true, |next| next.is_whitespace()) {
                    in_quotes = false;
                }
            } else if token.is_empty() || token.ends_with('=') {
                in_quotes = true;
            }
        }
        token.push(c);
    }

    if in_quotes {
        Err(token)
    } else {
        Ok(token)
    }
}

fn accept_token(parsed: &mut ParsedLine, token: String) {
    match token.split_once('=') {
        Some((name, value)) if !name.is_empty() => {
            let value = strip_double_quotes(value);
            parsed.arguments.insert(name.to_string(), value.to_string());
        }
        _ => {
            warn!("Invalid argument format: {token}");
            parsed.rejected.push(token);
        }
    }
}

fn strip_double_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
