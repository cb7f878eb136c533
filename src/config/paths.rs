//! Path management for Zenny
//!
//! ## Path Resolution Order
//!
//! 1. `ZENNY_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `zenny` (e.g. `~/.config/zenny`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ZennyError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ZENNY_DATA_DIR";

/// Manages all paths used by Zenny
#[derive(Debug, Clone)]
pub struct ZennyPaths {
    base_dir: PathBuf,
}

impl ZennyPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ZennyError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "zenny")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ZennyError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create ZennyPaths with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding one JSON document per user
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ZennyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ZennyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ZennyError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
