//! Bookshelf configuration
//!
//! TOML-backed settings in the platform config directory. Loading is
//! forgiving (missing file means defaults, invalid values warn); saving is
//! strict (invalid values refuse to persist) and atomic.

pub mod error;
pub mod persistence;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use persistence::ConfigPersistence;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level for application logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Collection directory pre-selected on the open screen
    pub default_collection_dir: Option<PathBuf>,

    /// Remember the last opened collection as the new default
    pub remember_last_collection: bool,

    /// Log level for application output
    pub log_level: LogLevel,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_collection_dir: None,
            remember_last_collection: true,
            log_level: LogLevel::Info,
        }
    }
}

/// Settings for the ISBN metadata lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    /// Whether the add screen offers ISBN pre-fill at all
    pub enabled: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Catalog base URL
    pub base_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 30,
            base_url: "https://openlibrary.org".to_string(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub lookup: LookupConfig,
}

impl Config {
    /// Validates every section, collecting all failures
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !(1..=300).contains(&self.lookup.timeout_secs) {
            errors.push(ValidationError::new(
                "lookup.timeout_secs",
                "must be between 1 and 300",
            ));
        }

        if self.lookup.base_url.trim().is_empty() {
            errors.push(ValidationError::new("lookup.base_url", "must not be empty"));
        }

        if let Some(dir) = &self.general.default_collection_dir {
            if dir.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "general.default_collection_dir",
                    "must not be empty when set",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
