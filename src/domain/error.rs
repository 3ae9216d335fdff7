//! Domain error types

use thiserror::Error;

/// Error when a required identifier is empty or malformed
#[derive(Debug, Clone, Error)]
#[error("Invalid {kind}: \"{input}\". Expected a non-empty identifier without whitespace")]
pub struct InvalidIdError {
    pub kind: &'static str,
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),

    #[error("Missing required setting '{0}'. Set it via 'voicepost config set {0} <value>'")]
    Missing(&'static str),
}
