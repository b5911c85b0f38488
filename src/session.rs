use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::SessionError;
use crate::input::KeySource;
use crate::matcher::LineMatcher;
use crate::practice::PracticeText;
use crate::results::{LogRecord, ResultsLog};
use crate::screen::Screen;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub context_lines: usize,
    pub context_marker: String,
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            context_lines: cfg.context_lines,
            context_marker: cfg.context_marker.clone(),
        }
    }
}

/// Running totals for one session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub total_misses: u64,
    pub started_at: Instant,
}

impl SessionStats {
    pub fn start() -> Self {
        Self {
            total_misses: 0,
            started_at: Instant::now(),
        }
    }

    pub fn add_line(&mut self, misses: u32) {
        self.total_misses += u64::from(misses);
    }

    pub fn finish(self) -> SessionSummary {
        SessionSummary {
            misses: self.total_misses,
            elapsed: self.started_at.elapsed(),
        }
    }
}

/// Final numbers of a completed session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub misses: u64,
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn record(&self) -> LogRecord {
        LogRecord::today(self.misses, self.elapsed)
    }
}

pub struct SessionRunner<'a, W: Write> {
    config: SessionConfig,
    keys: &'a mut dyn KeySource,
    screen: &'a mut Screen<W>,
}

impl<'a, W: Write> SessionRunner<'a, W> {
    pub fn new(
        config: SessionConfig,
        keys: &'a mut dyn KeySource,
        screen: &'a mut Screen<W>,
    ) -> Self {
        Self {
            config,
            keys,
            screen,
        }
    }

    fn intro(&mut self) -> Result<(), SessionError> {
        self.screen.clear()?;
        self.screen.print_line("=== Typing Practice ===")?;
        self.screen.print_line("- Indentation is typed for you")?;
        self.screen.print_line("- You can't move on until the character is right")?;
        self.screen.print_line("- Quit with Ctrl+C")?;
        self.screen.print_line("Press any key to start...")?;
        self.keys.read_key()?;
        Ok(())
    }

    /// Type every line of `text` in order. Returns once the last line is
    /// done; an interrupt unwinds straight out.
    pub fn play(&mut self, text: &PracticeText) -> Result<SessionSummary, SessionError> {
        self.intro()?;

        let mut stats = SessionStats::start();
        info!(lines = text.len(), "session started");
        for (i, line) in text.lines().iter().enumerate() {
            self.screen.clear()?;
            let context = text.context_before(i, self.config.context_lines);
            self.screen
                .print_context(context, &self.config.context_marker)?;

            let misses = LineMatcher::new(line).play(self.keys, self.screen)?;
            debug!(line = i, misses, "line complete");
            stats.add_line(misses);

            self.screen.newline()?;
        }

        let summary = stats.finish();
        info!(misses = summary.misses, elapsed = ?summary.elapsed, "session complete");
        Ok(summary)
    }

    /// Full session: play, show the results, append them to `log`, then wait
    /// for a final key.
    pub fn run(
        &mut self,
        text: &PracticeText,
        log: &ResultsLog,
    ) -> Result<SessionSummary, SessionError> {
        let summary = self.play(text)?;

        self.screen.newline()?;
        self.screen.newline()?;
        self.screen.print_line("=== Practice complete! ===")?;
        self.screen.print_line(&format!(
            "Time: {:.2} sec",
            summary.elapsed.as_secs_f64()
        ))?;
        self.screen
            .print_line(&format!("Total misses: {}", summary.misses))?;

        match log.append(&summary.record()) {
            Ok(()) => {
                self.screen.newline()?;
                self.screen.print_line(&format!(
                    "Saved results to {}",
                    log.path().display()
                ))?;
            }
            Err(e) => {
                warn!(error = %e, "could not save results");
                self.screen.newline()?;
                self.screen
                    .print_line(&format!("Could not save results: {e}"))?;
            }
        }

        self.screen.print_line("Press any key to exit...")?;
        self.keys.read_key()?;
        Ok(summary)
    }
}
