use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides every default location below with a single directory.
pub const HOME_ENV: &str = "LINEDRILL_HOME";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn override_dir() -> Option<PathBuf> {
        std::env::var_os(HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "linedrill")
    }

    /// Where the practice text, sample and csv log live.
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = Self::override_dir() {
            return dir;
        }
        Self::project()
            .map(|pd| pd.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_path() -> PathBuf {
        if let Some(dir) = Self::override_dir() {
            return dir.join("config.json");
        }
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("linedrill_config.json"))
    }

    /// Directory for the diagnostic log, under $HOME/.local/state when available.
    pub fn state_dir() -> PathBuf {
        if let Some(dir) = Self::override_dir() {
            return dir;
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("linedrill");
        }
        Self::project()
            .map(|pd| pd.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
