use std::io::Write;

use tracing::{error, warn};

use crate::bootstrap::{seed_practice_file, Seeded};
use crate::config::Config;
use crate::error::SessionError;
use crate::input::KeySource;
use crate::practice::PracticeText;
use crate::results::ResultsLog;
use crate::screen::Screen;
use crate::session::{SessionRunner, SessionSummary};

/// How a run ended when it wasn't interrupted.
#[derive(Debug, Clone, PartialEq)]
pub enum Exit {
    Completed(SessionSummary),
    /// There was nothing to practice; no log row was written.
    NoText,
}

/// Seed the practice file if needed, load it, and run one session.
pub fn run<W: Write>(
    config: &Config,
    keys: &mut dyn KeySource,
    screen: &mut Screen<W>,
) -> Result<Exit, SessionError> {
    match seed_practice_file(&config.practice_file, &config.sample_file) {
        Ok(Seeded::AlreadyPresent) | Ok(Seeded::NoSample) => {}
        Ok(Seeded::FromSample(from)) => {
            screen.print_line("First run setup")?;
            screen.print_line(&format!(
                " Created {} from {}.",
                config.practice_file.display(),
                from.display()
            ))?;
        }
        Ok(Seeded::FromBundled) => {
            screen.print_line("First run setup")?;
            screen.print_line(&format!(
                " Created {} from the bundled sample.",
                config.practice_file.display()
            ))?;
        }
        Err(e) => {
            warn!(error = %e, "setup failed");
            screen.print_line(&format!("Setup error: {e}"))?;
        }
    }

    let text = match PracticeText::load(&config.practice_file) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "could not load practice text");
            screen.print_line(&format!("Error: {e}"))?;
            PracticeText::default()
        }
    };

    if text.is_empty() {
        screen.print_line("Could not load the practice text. Exiting.")?;
        keys.read_key()?;
        return Ok(Exit::NoText);
    }

    let log = ResultsLog::new(&config.log_file);
    let summary = SessionRunner::new(config.into(), keys, screen).run(&text, &log)?;
    Ok(Exit::Completed(summary))
}
