//! Context-sensitive completion for REPL lines.
//!
//! The completer only reads the registry. Positions are counted in chars,
//! matching what a line editor tracks.

use log::trace;

use crate::descriptor::CommandDescriptor;
use crate::kinds::ParamKind;
use crate::registry::Registry;

/// Text to insert in place of `line[start..cursor]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub replacement: String,
    pub start: usize,
}

impl Candidate {
    fn new(replacement: impl Into<String>, start: usize) -> Self {
        Self {
            replacement: replacement.into(),
            start,
        }
    }
}

pub struct Completer<'a> {
    registry: &'a Registry,
}

impl<'a> Completer<'a> {
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Candidates for the word under `cursor`, in registry order.
    ///
    /// - within the first word: command names containing the typed text
    /// - at a fresh word, or a word without `=`, with balanced quotes:
    ///   argument names not yet given, each followed by `=`
    /// - right after `name=`: the permitted values of `name`, or
    ///   `true`/`false` for a boolean
    #[must_use]
    pub fn complete(&self, line: &str, cursor: usize) -> Vec<Candidate> {
        let before: String = line.chars().take(cursor).collect();
        let cursor = before.chars().count();
        let first_word_start = before.chars().take_while(|c| c.is_whitespace()).count();
        let typed = &before[byte_offset(&before, first_word_start)..];

        if !typed.contains(char::is_whitespace) {
            return self.command_candidates(typed, first_word_start);
        }

        let Some(command) = line
            .split_whitespace()
            .next()
            .and_then(|name| self.registry.get(name))
        else {
            return Vec::new();
        };

        let current_word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default();
        let word_start = cursor - current_word.chars().count();
        let quotes = before.chars().filter(|c| matches!(c, '"' | '\'')).count();

        if !current_word.contains('=') && quotes % 2 == 0 {
            argument_candidates(command, &before, current_word, word_start)
        } else if let Some(name) = current_word.strip_suffix('=') {
            value_candidates(command, name, cursor)
        } else {
            Vec::new()
        }
    }

    fn command_candidates(&self, typed: &str, start: usize) -> Vec<Candidate> {
        trace!("Completing command names matching `{typed}`");
        self.registry
            .names()
            .filter(|name| name.contains(typed))
            .map(|name| Candidate::new(name, start))
            .collect()
    }
}

fn argument_candidates(
    command: &CommandDescriptor,
    before: &str,
    partial: &str,
    start: usize,
) -> Vec<Candidate> {
    let present: Vec<&str> = before
        .split_whitespace()
        .skip(1)
        .filter_map(|token| token.split_once('='))
        .map(|(name, _)| name)
        .filter(|name| !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_'))
        .collect();

    command
        .parameters()
        .filter(|parameter| parameter.name.starts_with(partial))
        .filter(|parameter| !present.contains(&parameter.name.as_str()))
        .map(|parameter| Candidate::new(format!("{}=", parameter.name), start))
        .collect()
}

fn value_candidates(command: &CommandDescriptor, name: &str, cursor: usize) -> Vec<Candidate> {
    let Some(parameter) = command.parameter(name) else {
        return Vec::new();
    };

    if let Some(permitted) = command.permitted_values(name) {
        return permitted
            .resolve()
            .iter()
            .map(|value| Candidate::new(value.to_string(), cursor))
            .collect();
    }

    if parameter.kind == ParamKind::Boolean {
        return vec![Candidate::new("true", cursor), Candidate::new("false", cursor)];
    }

    Vec::new()
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Applies `candidate` to `line`, returning the new line and cursor.
#[must_use]
pub fn apply_candidate(line: &str, cursor: usize, candidate: &Candidate) -> (String, usize) {
    let start = byte_offset(line, candidate.start.min(cursor));
    let end = byte_offset(line, cursor);

    let mut completed = String::with_capacity(line.len() + candidate.replacement.len());
    completed.push_str(&line[..start]);
    completed.push_str(&candidate.replacement);
    completed.push_str(&line[end..]);

    let new_cursor = candidate.start.min(cursor) + candidate.replacement.chars().count();
    (completed, new_cursor)
}

/// Longest prefix shared by every replacement; empty when there are none.
#[must_use]
pub fn common_prefix(candidates: &[Candidate]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };

    let mut prefix = first.replacement.as_str();
    for candidate in rest {
        let shared = prefix
            .char_indices()
            .zip(candidate.replacement.chars())
            .find(|((_, a), b)| a != b)
            .map_or_else(
                || prefix.len().min(candidate.replacement.len()),
                |((offset, _), _)| offset,
            );
        prefix = &prefix[..shared];
    }

    prefix.to_string()
}
