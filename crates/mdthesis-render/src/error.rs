//! Error types for external rendering

use thiserror::Error;

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while driving the external toolchain
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer binary could not be spawned at all
    #[error("renderer binary not found: {0} (is it installed and on PATH?)")]
    BinaryNotFound(String),

    /// The renderer ran and reported failure
    #[error("{binary} failed ({status}):\n{stderr}")]
    CommandFailed {
        /// Binary that was invoked
        binary: String,
        /// Child exit status
        status: std::process::ExitStatus,
        /// Captured stderr, verbatim
        stderr: String,
    },

    /// IO error while spawning or collecting output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
