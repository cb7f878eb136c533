//! User settings for Zenny
//!
//! Stored as `config.json` in the base directory. Every field is defaulted,
//! so an empty or older file still loads.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::ZennyPaths;
use crate::error::ZennyError;
use crate::models::budget::validate_threshold;
use crate::models::DEFAULT_THRESHOLD;
use crate::services::ledger::SpendPeriod;
use crate::storage::file_io::write_json_atomic;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Upper bound on any single store call
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,

    /// Threshold used when a budget is set without one
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,

    /// Which expenses count toward a budget
    #[serde(default)]
    pub spend_window: SpendPeriod,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_store_timeout_secs() -> u64 {
    10
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            store_timeout_secs: default_store_timeout_secs(),
            default_threshold: default_threshold(),
            spend_window: SpendPeriod::default(),
            currency_symbol: default_currency(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs.max(1))
    }

    /// Load settings from disk, writing the defaults out on first run
    pub fn load_or_create(paths: &ZennyPaths) -> Result<Self, ZennyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ZennyError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ZennyError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ZennyError> {
        validate_threshold(self.default_threshold).map_err(|e| {
            ZennyError::Config(format!("default_threshold: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ZennyPaths) -> Result<(), ZennyError> {
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }
}
