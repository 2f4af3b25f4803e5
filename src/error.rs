//! Error types shared across the library.

use thiserror::Error;

/// Library result alias
pub type Result<T> = std::result::Result<T, SitingError>;

/// Errors raised by catalog loading, configuration and submission
#[derive(Debug, Error)]
pub enum SitingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Catalog request failed: {0}")]
    Http(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Only raised when unknown keys are handled strictly
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown selection mode: {0}. Use 'region' or 'drain'")]
    UnknownMode(String),

    #[error("No categories selected. Select at least one category before submitting")]
    EmptySelection,
}
