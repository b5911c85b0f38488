//! Process-wide Ctrl+C handling for the moments the terminal is not in raw
//! mode (drawing, the miss flash, the summary). Raw reads see Ctrl+C as a key
//! and unwind through `KeyError::Interrupted` instead.

use std::io::{self, Write};

#[cfg(unix)]
use signal_hook::consts::signal::SIGINT;
#[cfg(unix)]
use signal_hook::iterator::Signals;
#[cfg(unix)]
use tracing::warn;

pub const ABORTED: &str = "Aborted.";

/// Restore the terminal and tell the user the session was abandoned.
pub fn report_abort<W: Write>(out: &mut W) -> io::Result<()> {
    let _ = crossterm::terminal::disable_raw_mode();
    write!(out, "\r\n{ABORTED}\r\n")?;
    out.flush()
}

/// Keeps the SIGINT listener alive. Dropping it stops the listener.
#[derive(Debug)]
pub struct InterruptGuard {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: Option<std::thread::JoinHandle<()>>,
}

impl InterruptGuard {
    /// Exit with status 0 on SIGINT after printing the abort message. Nothing
    /// else runs, so no log row is written.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if signals.forever().next().is_some() {
                warn!("SIGINT received outside a key read");
                let _ = report_abort(&mut io::stdout());
                std::process::exit(0);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
