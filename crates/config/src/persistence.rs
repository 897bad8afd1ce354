//! File system persistence for configuration
//!
//! Reads and writes the config file with atomic writes, directory creation,
//! and graceful error handling. All errors surface via Result types.

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CONFIG_FILE_NAME: &str = "bookshelf.toml";

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Creates a persistence handler at the platform config location
    pub fn at_default_location() -> ConfigResult<Self> {
        let dirs = directories::ProjectDirs::from("", "", "bookshelf").ok_or_else(|| {
            ConfigError::PathResolutionError {
                reason: "no home directory available".to_string(),
            }
        })?;

        Ok(Self::new(dirs.config_dir().join(CONFIG_FILE_NAME)))
    }

    /// The path this handler reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file.
    ///
    /// If the file doesn't exist, returns the default config. An empty or
    /// unparseable file is an error, not a silent default. Validation
    /// problems in an otherwise well-formed file warn rather than fail so
    /// users can fix them without losing their settings.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if let Err(errors) = config.validate() {
            let error_msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            log::warn!("Config validation warnings: {}", error_msg);
        }

        Ok(config)
    }

    /// Saves configuration to file atomically.
    ///
    /// Writes to a temporary file in the target directory, then renames into
    /// place, so the config file is never left partially written.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            let error_msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::ValidationError(error_msg));
        }

        let parent = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(|e| ConfigError::DirectoryCreationError {
                path: parent.clone(),
                source: e,
            })?;
        }

        let toml_string = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(|e| ConfigError::WriteError {
            path: self.config_path.clone(),
            source: e,
        })?;
        temp.write_all(toml_string.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e,
            })?;
        temp.persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::debug!("Saved config to {}", self.config_path.display());
        Ok(())
    }
}
