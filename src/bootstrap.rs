use include_dir::{include_dir, Dir};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::SAMPLE_FILE_NAME;
use crate::error::SetupError;

static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// What happened when making sure a practice file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seeded {
    AlreadyPresent,
    /// Copied from a sample file on disk.
    FromSample(PathBuf),
    /// Written from the sample compiled into the binary.
    FromBundled,
    NoSample,
}

pub fn bundled_sample() -> Option<&'static str> {
    ASSETS
        .get_file(SAMPLE_FILE_NAME)
        .and_then(|f| f.contents_utf8())
}

/// Create the practice file from a sample if it doesn't exist yet. An on-disk
/// sample wins over the bundled one.
pub fn seed_practice_file(practice: &Path, sample: &Path) -> Result<Seeded, SetupError> {
    if practice.exists() {
        return Ok(Seeded::AlreadyPresent);
    }

    if sample.is_file() {
        ensure_parent(practice).map_err(|source| SetupError::Copy {
            from: sample.to_path_buf(),
            to: practice.to_path_buf(),
            source,
        })?;
        fs::copy(sample, practice).map_err(|source| SetupError::Copy {
            from: sample.to_path_buf(),
            to: practice.to_path_buf(),
            source,
        })?;
        info!(from = %sample.display(), to = %practice.display(), "seeded practice file");
        return Ok(Seeded::FromSample(sample.to_path_buf()));
    }

    match bundled_sample() {
        Some(text) => {
            ensure_parent(practice)
                .and_then(|_| fs::write(practice, text))
                .map_err(|source| SetupError::Seed {
                    to: practice.to_path_buf(),
                    source,
                })?;
            info!(to = %practice.display(), "seeded practice file from bundled sample");
            Ok(Seeded::FromBundled)
        }
        None => Ok(Seeded::NoSample),
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
