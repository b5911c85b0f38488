use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reading a keystroke from the terminal or stdin.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The user pressed the interrupt key (Ctrl+C) or input was closed.
    #[error("interrupted")]
    Interrupted,
    #[error("failed to read key: {0}")]
    Io(#[from] io::Error),
}

/// Problems preparing or loading the practice text.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write bundled sample to {}: {source}", .to.display())]
    Seed {
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} not found", .0.display())]
    Missing(PathBuf),
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that ends a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("aborted")]
    Interrupted,
    #[error("failed to read key: {0}")]
    Key(io::Error),
    #[error("terminal output failed: {0}")]
    Screen(#[from] io::Error),
}

impl From<KeyError> for SessionError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Interrupted => SessionError::Interrupted,
            KeyError::Io(e) => SessionError::Key(e),
        }
    }
}
