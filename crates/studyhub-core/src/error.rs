//! Core error types for studyhub-core.
//!
//! Only validation errors ever reach a caller of the model operations.
//! Storage and decode failures are absorbed by [`crate::Context`] and surfaced
//! as warnings, so the in-memory model always stays usable.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyhub-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any mutation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence backend failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required free text was empty after trimming
    #[error("{field} cannot be empty")]
    EmptyText { field: &'static str },

    /// Out of bounds
    #[error("Position {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Persistence errors raised by a [`crate::storage::PersistentStore`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite backend failure
    #[error("Query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open or create the backing file
    #[error("Failed to open storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized for storage
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the value would exceed the storage quota
    #[error("Storage quota exceeded writing '{key}' ({needed} of {quota} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ValidationError {
    pub(crate) fn check_position(
        collection: &'static str,
        index: usize,
        len: usize,
    ) -> Result<(), ValidationError> {
        if index < len {
            Ok(())
        } else {
            Err(ValidationError::OutOfBounds {
                collection,
                index,
                len,
            })
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
