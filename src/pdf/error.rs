//! Error types for the PDF module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External tool could not be started
    #[error("Failed to run {tool}: {message}")]
    ToolUnavailable {
        /// Program name
        tool: String,
        /// Spawn error
        message: String,
    },

    /// External tool ran but reported failure
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        /// Program name
        tool: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// Text extraction failure
    #[error("Text extraction error: {0}")]
    Extraction(String),

    /// Nothing to merge
    #[error("No readable PDF files found in {0}")]
    NoInputs(String),

    /// Background task failure
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl From<PdfError> for CrateError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Io(e) => CrateError::Io(e),
            _ => CrateError::Pdf(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for PdfError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(format!("Failed to join task: {}", err))
    }
}
