//! Configuration management for taskvox.
//!
//! This module provides core configuration that doesn't depend on
//! platform-specific UI libraries.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::APP_NAME;

/// Core configuration structure for the application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Display name used in the header greeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Simulated processing delay before a recording becomes a task
    /// (in seconds)
    #[serde(
        default = "default_processing_delay",
        skip_serializing_if = "is_default_processing_delay"
    )]
    pub processing_delay: f32,

    /// Mirror warnings and errors as desktop notifications
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub notifications: bool,
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn default_processing_delay() -> f32 {
    2.0
}

fn is_default_processing_delay(v: &f32) -> bool {
    (*v - 2.0).abs() < f32::EPSILON
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            processing_delay: default_processing_delay(),
            notifications: true,
        }
    }
}

impl Config {
    /// Get the configured display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the processing delay as a Duration
    pub fn processing_delay(&self) -> Duration {
        Duration::from_secs_f32(self.processing_delay)
    }

    pub fn notifications(&self) -> bool {
        self.notifications
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration directory.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a new ConfigManager with a specified configuration directory.
    #[cfg(test)]
    pub fn with_config_dir<P: AsRef<std::path::Path>>(dir: P) -> Self {
        let config_path = dir.as_ref().join(format!("{}.toml", APP_NAME));
        Self { config_path }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration from the config file or returns default.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        Ok(config)
    }

    /// Saves the configuration to the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .with_context(|| format!("Failed to get parent directory of {:?}", self.config_path))?;

        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory at {:?}", config_dir))?;

        let serialized =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, serialized)
            .with_context(|| format!("Failed to write config file at {:?}", self.config_path))?;

        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.name.is_none());
        assert!(config.notifications);
        assert_eq!(config.processing_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            name: Some("Abhas".to_string()),
            processing_delay: 0.5,
            ..Default::default()
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.name, deserialized.name);
        assert_eq!(config.processing_delay, deserialized.processing_delay);
    }

    #[test]
    fn test_config_manager_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let manager = ConfigManager::with_config_dir(temp_dir.path());

        let config = Config {
            name: Some("Abhas".to_string()),
            ..Default::default()
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(config.name, loaded.name);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path());
        let loaded = manager.load().unwrap();
        assert!(loaded.name.is_none());
        assert!(loaded.notifications);
    }
}
