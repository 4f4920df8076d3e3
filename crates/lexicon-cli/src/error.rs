//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export engine error
    #[error(transparent)]
    Export(#[from] lexicon_export::ExportError),

    /// Expansion tool error
    #[error(transparent)]
    Expansion(#[from] lexicon_hunspell::ExpansionError),

    /// Database error
    #[error("Database error: {0}")]
    Store(#[from] lexicon_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Background task failed to complete
    #[error("Task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        CliError::Task(err.to_string())
    }
}
