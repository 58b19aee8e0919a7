//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Where knowledge-base files live
//! - Review keybindings
//!
//! Configuration is stored at `~/.config/recall/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/recall/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for knowledge-base files.
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,
    /// Key that records a "recognized" judgment during review.
    #[serde(default = "default_recognized_key")]
    pub recognized_key: char,
    /// Key that records a "forgotten" judgment during review.
    #[serde(default = "default_forgotten_key")]
    pub forgotten_key: char,
}

// Default functions
fn default_knowledge_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("knowledge"))
        .unwrap_or_else(|_| PathBuf::from("knowledge"))
}
fn default_recognized_key() -> char {
    'j'
}
fn default_forgotten_key() -> char {
    'f'
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_dir: default_knowledge_dir(),
            recognized_key: default_recognized_key(),
            forgotten_key: default_forgotten_key(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Persist the configuration.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }
}
