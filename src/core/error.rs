//! Error types for the plugin registry.

use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the fallible helpers around the registry.
///
/// The core `register` / `get_plugin` pair never produces these; they come
/// from typed lookups, strict registration and configuration loading.
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Plugin {name} has type {actual}, expected {expected}")]
    PluginTypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    // Registration errors
    #[error("Plugin {0} is already registered")]
    AlreadyRegistered(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
