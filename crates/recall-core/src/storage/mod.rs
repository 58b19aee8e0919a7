pub mod config;
pub mod progress;

pub use config::Config;
pub use progress::{ProgressStore, Snapshot};

use std::path::PathBuf;

/// Returns `~/.config/recall[-dev]/` based on RECALL_ENV.
///
/// Set RECALL_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> crate::error::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RECALL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("recall-dev")
    } else {
        base_dir.join("recall")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
