//! Common error types for trk services

use thiserror::Error;

/// Common result type for trk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and plumbing errors shared by all services
///
/// Request-level failures use [`crate::ApiError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
