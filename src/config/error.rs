//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("AI temperature must be between 0 and 2")]
    InvalidTemperature,

    #[error("AI max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Session sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("Session idle TTL must be greater than zero")]
    InvalidIdleTtl,
}
