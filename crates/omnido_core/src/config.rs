//! Runtime configuration for hosts of the core.
//!
//! # Responsibility
//! - Resolve the database path and logging settings.
//! - Default to the per-user data directory of the platform.
//! - Allow environment overrides without a config file.
//!
//! # Invariants
//! - A resolved config always carries a supported log level.

use crate::logging::{default_log_level, normalize_level};
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "omnido";

pub const DATA_PATH_ENV: &str = "OMNIDO_DATA_PATH";
pub const LOG_LEVEL_ENV: &str = "OMNIDO_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "OMNIDO_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "omnido.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding all collections.
    pub data_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: &'static str,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Defaults rooted at `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            data_path: base_dir.join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: base_dir.join(DEFAULT_LOG_DIR_NAME),
        }
    }

    /// Per-user defaults, overridden by process environment.
    ///
    /// # Errors
    /// - No home directory can be determined for the current user.
    /// - The log level override is unsupported.
    pub fn resolve() -> Result<Self, String> {
        let base_dir = default_base_dir()
            .ok_or_else(|| "could not determine the user data directory".to_string())?;
        Self::from_env(base_dir)
    }

    /// Defaults rooted at `base_dir`, overridden by process environment.
    pub fn from_env(base_dir: impl Into<PathBuf>) -> Result<Self, String> {
        Self::with_base_dir(base_dir).with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup` (an environment-like getter).
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    /// - Returns an error when the log level override is unsupported.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(path) = read(DATA_PATH_ENV) {
            self.data_path = PathBuf::from(path.trim());
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            self.log_level = normalize_level(&level)?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            self.log_dir = PathBuf::from(dir.trim());
        }
        Ok(self)
    }
}

/// Platform data directory for OmniDo, e.g. `~/.local/share/omnido` on Linux.
pub fn default_base_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}
