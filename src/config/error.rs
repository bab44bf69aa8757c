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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Publishable key must start with pk_")]
    InvalidPublishableKey,

    #[error("Secret keys must never be used for client-side tokenization")]
    SecretKeyNotAllowed,

    #[error("{0} must use HTTPS")]
    UrlMustBeHttps(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
