// Error types for the viewer bootstrap

use thiserror::Error;

/// Failures surfaced by the advisory checks and the bundle renderer.
///
/// The initializer itself never produces one of these.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Invalid viewer configuration: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ViewerError {
    fn from(e: serde_json::Error) -> Self {
        ViewerError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
