//! Configuration module for modbrowse
//!
//! Manages where the catalog and favorite store live, plus display defaults.
//! Configuration is read from the user's config directory and may be
//! overridden with `MODBROWSE_*` environment variables.

use crate::browse::SortMode;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Catalog file (TOML or JSON)
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Favorite score database directory
    #[serde(default)]
    pub favorites_db: Option<PathBuf>,

    /// Ordering of visible items
    #[serde(default)]
    pub sort_mode: SortMode,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

impl BrowserConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("modbrowse").join("config.toml"))
    }

    /// Default location of the favorite store
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn default_favorites_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("modbrowse").join("favorites"))
    }

    /// Load configuration from the default path, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` layered with `MODBROWSE_*` variables
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be deserialized.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("MODBROWSE"))
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the favorite store path, using the data directory if unset
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn favorites_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.favorites_db {
            Some(path) => Ok(path.clone()),
            None => Self::default_favorites_path(),
        }
    }
}
