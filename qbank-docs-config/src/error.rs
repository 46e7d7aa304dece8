// Errors raised while assembling viewer settings

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Setting not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to load settings: {0}")]
    LoadError(String),

    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    #[error("Invalid settings: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

impl From<qbank_docs_viewer::ViewerError> for ConfigError {
    fn from(e: qbank_docs_viewer::ViewerError) -> Self {
        ConfigError::ValidationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
