use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub const PRACTICE_FILE_NAME: &str = "typing_practice.txt";
pub const SAMPLE_FILE_NAME: &str = "typing_practice_sample.txt";
pub const LOG_FILE_NAME: &str = "typing_log.csv";

/// Everything a session needs to know about where files live and how to draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub practice_file: PathBuf,
    pub sample_file: PathBuf,
    pub log_file: PathBuf,
    /// Number of completed lines shown above the active one.
    pub context_lines: usize,
    /// Prefix printed before each context line.
    pub context_marker: String,
    pub miss_flash_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::in_dir(AppDirs::data_dir())
    }
}

impl Config {
    /// Default settings with all files placed in `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            practice_file: dir.join(PRACTICE_FILE_NAME),
            sample_file: dir.join(SAMPLE_FILE_NAME),
            log_file: dir.join(LOG_FILE_NAME),
            context_lines: 3,
            context_marker: "   ".to_string(),
            miss_flash_ms: 100,
        }
    }

    pub fn miss_flash(&self) -> Duration {
        Duration::from_millis(self.miss_flash_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
    fn exists(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::in_dir(dir.path());
        store.save(&cfg).unwrap();
        assert!(store.exists());
        assert_eq!(cfg, store.load());
    }

    #[test]
    fn test_defaults_use_three_context_lines_and_short_flash() {
        let cfg = Config::in_dir("/tmp/x");
        assert_eq!(cfg.context_lines, 3);
        assert_eq!(cfg.miss_flash(), Duration::from_millis(100));
        assert_eq!(cfg.log_file, Path::new("/tmp/x").join(LOG_FILE_NAME));
    }

    #[test]
    fn test_partial_config_fills_missing_fields_from_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"context_lines": 5}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.context_lines, 5);
        assert_eq!(cfg.miss_flash_ms, 100);
    }

    #[test]
    fn test_garbage_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"not json").unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.context_lines, 3);
    }

    #[test]
    fn test_missing_config_reports_absent() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert!(!store.exists());
    }
}
