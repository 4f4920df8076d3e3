//! Error types for export operations

use lexicon_hunspell::ExpansionError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during an export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Export directory missing, not a directory, or not writable
    #[error("Export store unavailable at {}: {reason}", path.display())]
    StoreUnavailable {
        /// Configured export directory
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// An archive template is absent or unreadable
    #[error("Template missing or unreadable: {}: {source}", path.display())]
    TemplateMissing {
        /// Template path
        path: PathBuf,
        /// Underlying read error
        #[source]
        source: io::Error,
    },

    /// The expansion tool failed or timed out
    #[error("Expansion failed: {0}")]
    Expansion(#[from] ExpansionError),

    /// Writing the output file failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        /// Final output path
        path: PathBuf,
        /// Underlying write error
        #[source]
        source: io::Error,
    },

    /// Storage collaborator error
    #[error("Storage error: {0}")]
    Storage(String),

    /// No project with the given code
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Archive encoding error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Unrecognized export format name
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
