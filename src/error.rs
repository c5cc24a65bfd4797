//! Error types for Roundtable
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Roundtable operations
///
/// Transport failures, configuration problems, and timeline invariant
/// violations all surface through this enum. Send and context-fetch
/// failures are absorbed by the session layer and never escape it.
#[derive(Error, Debug)]
pub enum RoundtableError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input that cannot be sent (blank text, rounds out of range)
    #[error("Invalid input: {0}")]
    Input(String),

    /// Network-level transport failures (connection refused, timeout, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status
    #[error("Backend returned HTTP {status} for {endpoint}")]
    HttpStatus {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code returned by the backend
        status: u16,
    },

    /// The backend answered with a body that does not match the expected shape
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse {
        /// Endpoint path that was requested
        endpoint: String,
        /// Decoder message
        message: String,
    },

    /// A message batch would break timeline id ordering
    #[error("Out-of-order message batch: {0}")]
    OutOfOrderBatch(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors in interactive mode
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Roundtable operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
