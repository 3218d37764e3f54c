//! Configuration management
//!
//! This module handles loading the shimhook configuration file.
//!
//! ```toml
//! [log]
//! verbose = false
//! file = "/var/log/shimhook.log"
//! ```

use crate::Result;
use crate::dirs::default_config_file;
use serde::{Deserialize, Serialize};
use shimhook_core::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Logging configuration section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Enable debug level logging
    #[serde(default)]
    pub verbose: bool,

    /// Also write logs to this file
    ///
    /// Relative paths are resolved against the config file's directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Shimhook configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        if let Some(parent) = path.parent() {
            config.resolve_relative_paths(parent);
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        toml::from_str(toml_content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load the explicit file if given, else the default file if it exists
    ///
    /// Falls back to defaults when neither is available. An explicit path
    /// that cannot be read is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_file() {
            Some(default) if default.is_file() => {
                tracing::debug!(path = %default.display(), "Loading default config file");
                Self::load(default)
            }
            _ => Ok(Self::default()),
        }
    }

    fn resolve_relative_paths(&mut self, base_dir: &Path) {
        if let Some(file) = &self.log.file
            && file.is_relative()
        {
            self.log.file = Some(base_dir.join(file));
        }
    }
}
