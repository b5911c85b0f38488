use std::collections::VecDeque;
use std::io::{self, Read};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};
use crossterm::tty::IsTty;
use tracing::{debug, trace};

use crate::error::KeyError;

const ETX: u8 = 0x03;

/// One keystroke as far as matching is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    /// Arrows, function keys, Esc, control combinations.
    Other,
}

/// Source of single keystrokes. `Err(KeyError::Interrupted)` means the user
/// asked to quit.
pub trait KeySource {
    /// Block until exactly one keystroke is available.
    fn read_key(&mut self) -> Result<Keystroke, KeyError>;
}

/// Puts the terminal in raw mode for as long as it lives, then restores
/// whatever mode was active before.
pub struct RawModeGuard {
    restore: bool,
}

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        let already_raw = is_raw_mode_enabled()?;
        if !already_raw {
            enable_raw_mode()?;
        }
        Ok(Self {
            restore: !already_raw,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.restore {
            let _ = disable_raw_mode();
        }
    }
}

/// Interactive terminal reader backed by crossterm.
#[derive(Debug, Default)]
pub struct TerminalKeyReader;

impl TerminalKeyReader {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeyReader {
    fn read_key(&mut self) -> Result<Keystroke, KeyError> {
        let _raw = RawModeGuard::acquire()?;
        loop {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases as separate events
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                trace!(?key, "key event");
                return translate_key(key);
            }
        }
    }
}

/// Map a crossterm key event onto what the matcher understands.
pub fn translate_key(key: KeyEvent) -> Result<Keystroke, KeyError> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    // AltGr arrives as Ctrl+Alt on Windows and still produces a printable char
    let altgr = ctrl && key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl && !altgr => Err(KeyError::Interrupted),
        KeyCode::Char(_) if ctrl && !altgr => Ok(Keystroke::Other),
        KeyCode::Char(c) => Ok(Keystroke::Char(c)),
        KeyCode::Enter => Ok(Keystroke::Char('\n')),
        KeyCode::Tab => Ok(Keystroke::Char('\t')),
        _ => Ok(Keystroke::Other),
    }
}

/// Reader for non-interactive stdin: one UTF-8 character per keystroke, no
/// terminal mode switching. ETX (Ctrl+C) and end of input both interrupt.
pub struct PipedKeyReader<R: Read> {
    inner: R,
}

impl<R: Read> PipedKeyReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn next_byte(&mut self) -> Result<u8, KeyError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Err(KeyError::Interrupted),
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> KeySource for PipedKeyReader<R> {
    fn read_key(&mut self) -> Result<Keystroke, KeyError> {
        let first = self.next_byte()?;
        if first == ETX {
            return Err(KeyError::Interrupted);
        }
        let len = match first {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Ok(Keystroke::Other),
        };
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            *slot = self.next_byte()?;
        }
        Ok(std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Keystroke::Other, Keystroke::Char))
    }
}

/// Pick the key source for this process: raw terminal reads when stdin is a
/// tty, plain byte reads otherwise.
pub fn stdin_key_source() -> Box<dyn KeySource> {
    if io::stdin().is_tty() {
        debug!("using terminal key reader");
        Box::new(TerminalKeyReader::new())
    } else {
        debug!("stdin is not a tty, using piped key reader");
        Box::new(PipedKeyReader::new(io::stdin()))
    }
}

/// Key source fed from a fixed script, for tests. Interrupts once drained.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Keystroke>,
    reads: usize,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Keystroke>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            reads: 0,
        }
    }

    pub fn typed(text: &str) -> Self {
        Self::new(text.chars().map(Keystroke::Char))
    }

    /// How many times `read_key` has been called.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<Keystroke, KeyError> {
        self.reads += 1;
        self.keys.pop_front().ok_or(KeyError::Interrupted)
    }
}
