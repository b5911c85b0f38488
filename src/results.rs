use chrono::{Local, NaiveDate};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::LogError;

/// One finished session as it is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRecord {
    pub date: NaiveDate,
    pub misses: u64,
    pub duration: Duration,
}

impl LogRecord {
    pub fn new(date: NaiveDate, misses: u64, duration: Duration) -> Self {
        Self {
            date,
            misses,
            duration,
        }
    }

    /// Record dated with the local calendar day.
    pub fn today(misses: u64, duration: Duration) -> Self {
        Self::new(Local::now().date_naive(), misses, duration)
    }

    fn row(&self) -> LogRow {
        LogRow {
            date: self.date.format("%Y/%m/%d").to_string(),
            miss_count: self.misses,
            time_sec: format!("{:.2}", self.duration.as_secs_f64()),
        }
    }
}

#[derive(Serialize)]
struct LogRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "MissCount")]
    miss_count: u64,
    #[serde(rename = "Time(sec)")]
    time_sec: String,
}

/// Append-only csv history of sessions.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, emitting the header first if the file doesn't exist
    /// yet. The row is encoded up front and written with a single call; the
    /// file is never truncated.
    pub fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_header = !self.path.exists();

        let mut encoder = WriterBuilder::new()
            .has_headers(needs_header)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());
        encoder.serialize(record.row())?;
        let bytes = encoder.into_inner().map_err(|e| e.into_error())?;

        let mut log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        log_file.write_all(&bytes)?;
        log_file.flush()?;

        info!(path = %self.path.display(), misses = record.misses, "session logged");
        Ok(())
    }
}
