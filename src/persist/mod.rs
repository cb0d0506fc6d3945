//! Persistence layer for console configuration.
//!
//! Provides RON-based save/load for the [`ConsoleConfig`] and the command
//! history.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConsoleConfig;
use crate::core::{Console, History};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// Serializable console state.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConsoleConfigFile {
    #[serde(default)]
    pub config: ConsoleConfig,
    /// History entries, oldest first.
    #[serde(default)]
    pub history: Vec<String>,
}

impl ConsoleConfigFile {
    /// Create a new config with default settings and no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current state of a console.
    pub fn from_console(console: &Console) -> Self {
        Self {
            config: console.config(),
            history: console.history().entries().to_vec(),
        }
    }

    /// Apply the settings to a console and replace its history.
    pub fn apply_to(&self, console: &mut Console) {
        console.apply_config(&self.config);
        *console.history_mut() = History::from_entries(self.history.iter().cloned());
    }

    /// Load config from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save config to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::Io(parent.display().to_string(), e.to_string()))?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))
    }

    /// Load config from file, returning default if file doesn't exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Errors that can occur during config operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error (path, message).
    #[error("IO error for '{0}': {1}")]
    Io(String, String),
    /// Parse error (path, message).
    #[error("Parse error for '{0}': {1}")]
    Parse(String, String),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Resource tracking the config file path.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_FILE.to_string())
    }
}

/// Save the console's settings and history to file.
pub fn save_config(console: &Console, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    ConsoleConfigFile::from_console(console).save(path)
}

/// System to load config on startup.
pub fn load_config_on_startup(
    mut console: ResMut<Console>,
    mut config: ResMut<ConsoleConfig>,
    config_path: Res<ConfigPath>,
) {
    let path = &config_path.0;

    if !Path::new(path).exists() {
        info!("No config file found at '{}', using defaults", path);
        return;
    }

    match ConsoleConfigFile::load(path) {
        Ok(file) => {
            info!("Loading config from '{}'", path);
            file.apply_to(&mut console);
            *config = file.config;
            debug!("Loaded {} history entries", console.history().len());
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
        }
    }
}
