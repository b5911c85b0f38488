use std::io::Write;

use tracing::trace;

use crate::error::SessionError;
use crate::input::{KeySource, Keystroke};
use crate::screen::{Prompt, Screen};
use crate::util::split_indent;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum MatchState {
    AwaitingChar(usize),
    LineDone,
}

/// Per-line progress: position in the stripped content and misses so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineState {
    pub cursor: usize,
    pub misses: u32,
}

/// Matches keystrokes against one practice line. Only the content after the
/// indent is typed; a miss never moves the cursor.
#[derive(Debug)]
pub struct LineMatcher<'a> {
    indent: &'a str,
    content: &'a str,
    /// Byte offset of every char in `content`.
    offsets: Vec<usize>,
    state: LineState,
}

impl<'a> LineMatcher<'a> {
    pub fn new(line: &'a str) -> Self {
        let (indent, content) = split_indent(line);
        Self {
            indent,
            content,
            offsets: content.char_indices().map(|(i, _)| i).collect(),
            state: LineState::default(),
        }
    }

    pub fn state(&self) -> MatchState {
        if self.state.cursor < self.offsets.len() {
            MatchState::AwaitingChar(self.state.cursor)
        } else {
            MatchState::LineDone
        }
    }

    pub fn misses(&self) -> u32 {
        self.state.misses
    }

    pub fn expected(&self) -> Option<char> {
        match self.state() {
            MatchState::AwaitingChar(i) => self.content[self.offsets[i]..].chars().next(),
            MatchState::LineDone => None,
        }
    }

    /// Apply one keystroke. Does nothing once the line is done.
    pub fn press(&mut self, key: Keystroke) -> Outcome {
        let Some(expected) = self.expected() else {
            return Outcome::Correct;
        };
        if key == Keystroke::Char(expected) {
            self.state.cursor += 1;
            Outcome::Correct
        } else {
            self.state.misses += 1;
            Outcome::Incorrect
        }
    }

    pub fn prompt(&self) -> Prompt<'a> {
        let split = self
            .offsets
            .get(self.state.cursor)
            .copied()
            .unwrap_or(self.content.len());
        let (completed, rest) = self.content.split_at(split);
        let mut rest_chars = rest.chars();
        let target = rest_chars.next();
        Prompt {
            indent: self.indent,
            completed,
            target,
            remaining: rest_chars.as_str(),
        }
    }

    /// Drive the line to completion, reading keys until every char matched.
    /// Returns the number of misses.
    pub fn play<W: Write>(
        mut self,
        keys: &mut dyn KeySource,
        screen: &mut Screen<W>,
    ) -> Result<u32, SessionError> {
        screen.render_prompt(&self.prompt())?;

        while let MatchState::AwaitingChar(i) = self.state() {
            let key = keys.read_key()?;
            match self.press(key) {
                Outcome::Correct => {}
                Outcome::Incorrect => {
                    trace!(position = i, ?key, "miss");
                    screen.flash_miss(&self.prompt())?;
                }
            }
            screen.render_prompt(&self.prompt())?;
        }

        Ok(self.state.misses)
    }
}
