//! Core error types for marathon-core.
//!
//! One taxonomy for the whole engine: network failures, input
//! validation, server-side conflicts, and configuration problems.
//! Every fallible operation returns these instead of swallowing
//! failures at the call site.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for marathon-core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Request failed before a server response was obtained.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed or out-of-domain input.
    #[error("Validation error for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The server rejected the operation (e.g. day not yet unlocked).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// An operation was issued while a previous one for the same key
    /// is still in flight.
    #[error("Request for '{key}' is already pending")]
    AlreadyPending { key: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
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

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
