//! Path management for the till ledger
//!
//! ## Path Resolution Order
//!
//! 1. `TILL_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (e.g. `~/.config/till` on Linux, `%APPDATA%\till\config` on Windows)
//! 3. `$HOME/.config/till`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TillError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TILL_DATA_DIR";

/// Manages all paths used by the till ledger
#[derive(Debug, Clone)]
pub struct TillPaths {
    /// Base directory for all ledger data
    base_dir: PathBuf,
}

impl TillPaths {
    /// Create a new TillPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or configuration directory can be determined.
    pub fn new() -> Result<Self, TillError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TillPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to entries.json
    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join("entries.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TillError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TillError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TillError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the ledger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, TillError> {
    if let Some(dirs) = ProjectDirs::from("", "", "till") {
        return Ok(dirs.config_dir().to_path_buf());
    }

    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".config").join("till"))
        .map_err(|_| TillError::Config("Could not determine a configuration directory".into()))
}
