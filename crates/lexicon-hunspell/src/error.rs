//! Error types for affix expansion

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running the expansion tool
#[derive(Error, Debug)]
pub enum ExpansionError {
    /// Tool could not be launched
    #[error("Failed to launch '{command}': {source}")]
    Spawn {
        /// Command that was run
        command: String,
        /// Underlying launch error
        #[source]
        source: std::io::Error,
    },

    /// Tool exited with a non-zero status
    #[error("unmunch failed: {stderr}")]
    Failed {
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Tool did not finish in time and was killed
    #[error("unmunch timed out after {after:?}")]
    Timeout {
        /// Configured limit
        after: Duration,
    },

    /// Staging inputs or collecting output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool output was not valid UTF-8
    #[error("Invalid output: {0}")]
    InvalidOutput(String),
}
