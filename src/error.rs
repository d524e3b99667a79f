//! Error types for focustrack
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for focustrack operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session and task persistence, and break
/// content fetching.
#[derive(Error, Debug)]
pub enum FocustrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session or task storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Break content fetch errors (HTTP failures, malformed responses)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for focustrack operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
