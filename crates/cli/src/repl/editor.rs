use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_verbs_core::completion::{apply_candidate, common_prefix, Candidate, Completer};

/// What the terminal should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Redraw,
    Submit(String),
    Interrupted,
    EndOfInput,
    /// Several completions remain; list them and redraw.
    Candidates(Vec<String>),
    Bell,
}

/// Editing state of the line being typed. Positions are in chars.
#[derive(Debug, Default)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    /// Position in history while browsing with Up/Down.
    history_index: Option<usize>,
    /// Line being typed before history browsing started.
    draft: String,
}

impl LineEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn set_text(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.text = text;
    }

    fn take_line(&mut self) -> String {
        self.cursor = 0;
        self.history_index = None;
        self.draft.clear();
        std::mem::take(&mut self.text)
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        completer: &Completer<'_>,
        history: &[String],
    ) -> KeyOutcome {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if control => {
                self.take_line();
                KeyOutcome::Interrupted
            }
            KeyCode::Char('d') if control => {
                if self.text.is_empty() {
                    KeyOutcome::EndOfInput
                } else {
                    self.delete()
                }
            }
            KeyCode::Char('a') if control => self.move_to(0),
            KeyCode::Char('e') if control => self.move_to(self.char_count()),
            KeyCode::Char(c) => {
                let offset = self.byte_offset(self.cursor);
                self.text.insert(offset, c);
                self.cursor += 1;
                KeyOutcome::Redraw
            }
            KeyCode::Enter => KeyOutcome::Submit(self.take_line()),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return KeyOutcome::Bell;
                }
                self.cursor -= 1;
                let offset = self.byte_offset(self.cursor);
                self.text.remove(offset);
                KeyOutcome::Redraw
            }
            KeyCode::Delete => self.delete(),
            KeyCode::Left if self.cursor > 0 => self.move_to(self.cursor - 1),
            KeyCode::Right if self.cursor < self.char_count() => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.char_count()),
            KeyCode::Up => self.history_previous(history),
            KeyCode::Down => self.history_next(history),
            KeyCode::Tab => self.complete(completer),
            _ => KeyOutcome::Bell,
        }
    }

    fn move_to(&mut self, cursor: usize) -> KeyOutcome {
        self.cursor = cursor;
        KeyOutcome::Redraw
    }

    fn delete(&mut self) -> KeyOutcome {
        if self.cursor >= self.char_count() {
            return KeyOutcome::Bell;
        }
        let offset = self.byte_offset(self.cursor);
        self.text.remove(offset);
        KeyOutcome::Redraw
    }

    fn history_previous(&mut self, history: &[String]) -> KeyOutcome {
        let index = match self.history_index {
            None if history.is_empty() => return KeyOutcome::Bell,
            None => {
                self.draft = self.text.clone();
                history.len() - 1
            }
            Some(0) => return KeyOutcome::Bell,
            Some(index) => index - 1,
        };

        self.history_index = Some(index);
        self.set_text(history[index].clone());
        KeyOutcome::Redraw
    }

    fn history_next(&mut self, history: &[String]) -> KeyOutcome {
        let Some(index) = self.history_index else {
            return KeyOutcome::Bell;
        };

        if index + 1 < history.len() {
            self.history_index = Some(index + 1);
            self.set_text(history[index + 1].clone());
        } else {
            self.history_index = None;
            let draft = std::mem::take(&mut self.draft);
            self.set_text(draft);
        }
        KeyOutcome::Redraw
    }

    /// One candidate is applied. Several are narrowed to their common prefix
    /// when that extends the typed word, and listed otherwise.
    fn complete(&mut self, completer: &Completer<'_>) -> KeyOutcome {
        let candidates = completer.complete(&self.text, self.cursor);

        match candidates.as_slice() {
            [] => KeyOutcome::Bell,
            [only] => {
                self.apply(only);
                KeyOutcome::Redraw
            }
            [first, ..] => {
                let prefix = common_prefix(&candidates);
                let typed: String = self
                    .text
                    .chars()
                    .skip(first.start)
                    .take(self.cursor.saturating_sub(first.start))
                    .collect();

                if prefix.starts_with(&typed) && prefix.chars().count() > typed.chars().count() {
                    let start = first.start;
                    self.apply(&Candidate {
                        replacement: prefix,
                        start,
                    });
                    KeyOutcome::Redraw
                } else {
                    KeyOutcome::Candidates(
                        candidates.into_iter().map(|c| c.replacement).collect(),
                    )
                }
            }
        }
    }

    fn apply(&mut self, candidate: &Candidate) {
        let (text, cursor) = apply_candidate(&self.text, self.cursor, candidate);
        self.text = text;
        self.cursor = cursor;
    }
}
