//! Configuration error types

use thiserror::Error;

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Database path must not be empty")]
    EmptyDatabasePath,

    #[error("Admin email and password must be set together")]
    IncompleteAdminCredentials,

    #[error("PDF margin must be between 0 and 50 mm, got {0}")]
    InvalidMargin(f64),

    #[error("PDF scale must be between 0.1 and 4, got {0}")]
    InvalidScale(f64),

    #[error("PDF image quality must be between 0 and 1, got {0}")]
    InvalidImageQuality(f64),
}
