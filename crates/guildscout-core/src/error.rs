//! Core error types for guildscout-core.
//!
//! Fatal conditions (fetch and storage failures) are modeled as typed
//! sub-errors folded into [`CoreError`]. A single recipient's delivery
//! failure is deliberately *not* part of that hierarchy: it is scoped to
//! one send and never aborts a batch, so it stays a standalone type.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for guildscout-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Level source failures
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Snapshot/blacklist file failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the external level source.
///
/// Always fatal: the run aborts before any persisted state changes.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The fetcher binary could not be started
    #[error("Failed to launch level source '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The fetcher ran but reported failure
    #[error("Level source exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    /// The fetcher produced output that is not valid UTF-8
    #[error("Level source produced non-UTF-8 output")]
    InvalidEncoding,

    /// The fetcher output could not be parsed as a roster
    #[error("Could not parse level source output as JSON: {0}")]
    InvalidOutput(#[source] serde_json::Error),
}

/// Snapshot or blacklist file failures.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File exists but could not be read or parsed
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// File could not be written
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
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

/// A single recipient's delivery failure.
///
/// Recoverable: logged at warn level, the recipient is excluded from the
/// success set, and the dispatch loop continues.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The mailer binary could not be started
    #[error("Failed to launch mailer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The mailer ran but reported failure for this recipient
    #[error("Mailer exited with status {status} for '{recipient}': {stderr}")]
    Failed {
        recipient: String,
        status: i32,
        stderr: String,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
