//! Configuration management commands.

use std::path::PathBuf;

use clap::Subcommand;
use recall_core::{Config, ConfigError, CoreError, Result};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value
    Set {
        /// Key: knowledge_dir, recognized_key or forgotten_key
        key: String,
        value: String,
    },
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            let raw =
                toml::to_string_pretty(&config).map_err(|e| CoreError::Custom(e.to_string()))?;
            print!("{raw}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "knowledge_dir" => config.knowledge_dir = PathBuf::from(&value),
                "recognized_key" => config.recognized_key = parse_key(&key, &value)?,
                "forgotten_key" => config.forgotten_key = parse_key(&key, &value)?,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key,
                        message: "unknown key".to_string(),
                    }
                    .into())
                }
            }
            config.save()?;
            println!("Set {key}.");
            Ok(())
        }
    }
}

fn parse_key(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_ascii_lowercase()),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "expected a single character".to_string(),
        }
        .into()),
    }
}
