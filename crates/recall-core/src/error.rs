//! Core error types for recall-core.
//!
//! This module defines the error hierarchy using thiserror. Only load-time
//! failures are surfaced to the caller; persistence and queue-consistency
//! problems are demoted to logged warnings at their call sites.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recall-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Knowledge-base related errors
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Knowledge-base specific errors.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Knowledge-base file does not exist
    #[error("Knowledge base not found: {path}")]
    NotFound { path: PathBuf },

    /// File exists but could not be parsed as a card list
    #[error("Malformed knowledge base {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// Requested card id is not present in the file
    #[error("No card with id '{id}' in {path}")]
    UnknownId { id: String, path: PathBuf },

    /// Filesystem access failed
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
