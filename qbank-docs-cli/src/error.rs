//! Error types for the qbank-docs CLI.

use qbank_docs_config::ConfigError;
use qbank_docs_viewer::ViewerError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Viewer(#[from] ViewerError),

    /// The configuration loaded but would not work in Swagger UI
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Command error: {0}")]
    Command(String),
}
