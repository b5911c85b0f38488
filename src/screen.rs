use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{MoveTo, MoveToColumn},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::util::display_width;

const SUCCESS: Color = Color::Green;
const PENDING: Color = Color::DarkGrey;
const ERROR_BG: Color = Color::Red;

/// The active line split into its visual zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub indent: &'a str,
    pub completed: &'a str,
    /// `None` once the whole line has been typed.
    pub target: Option<char>,
    pub remaining: &'a str,
}

impl Prompt<'_> {
    /// Column the cursor should sit on: right under the target character.
    pub fn cursor_column(&self) -> usize {
        display_width(&format!("{}{}", self.indent, self.completed))
    }
}

/// Line-oriented renderer over any writer.
pub struct Screen<W: Write> {
    out: W,
    miss_flash: Duration,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, miss_flash: Duration) -> Self {
        Self { out, miss_flash }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    /// Print already-finished lines verbatim, each behind `marker`.
    pub fn print_context<S: AsRef<str>>(&mut self, lines: &[S], marker: &str) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}{}", marker, line.as_ref())?;
        }
        self.out.flush()
    }

    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.print_line("")
    }

    /// Redraw the active line in place and park the cursor under the target.
    pub fn render_prompt(&mut self, prompt: &Prompt) -> io::Result<()> {
        queue!(
            self.out,
            Print('\r'),
            Print(prompt.indent),
            SetForegroundColor(SUCCESS),
            Print(prompt.completed),
            ResetColor,
            SetForegroundColor(PENDING),
        )?;
        if let Some(target) = prompt.target {
            queue!(self.out, Print(target))?;
        }
        queue!(
            self.out,
            Print(prompt.remaining),
            ResetColor,
            MoveToColumn(column(prompt.cursor_column())),
        )?;
        self.out.flush()
    }

    /// Highlight the missed target character, hold it briefly, then put the
    /// cursor back where it was. The caller redraws afterwards.
    pub fn flash_miss(&mut self, prompt: &Prompt) -> io::Result<()> {
        let Some(target) = prompt.target else {
            return Ok(());
        };
        queue!(
            self.out,
            SetBackgroundColor(ERROR_BG),
            Print(target),
            ResetColor,
            MoveToColumn(column(prompt.cursor_column())),
        )?;
        self.out.flush()?;
        if !self.miss_flash.is_zero() {
            thread::sleep(self.miss_flash);
        }
        Ok(())
    }
}

fn column(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}
