//! Error types for the language model client

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for language model operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failure that may succeed if tried again: network errors, 429, 5xx
    #[error("Transient API error: {0}")]
    Transient(String),

    /// The API answered with something that is not a usable completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API returned a non-retryable error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// No API key configured
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    /// HTTP client construction error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl LlmError {
    /// Whether the failure is worth retrying by the caller
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Transient(_))
    }
}

impl From<LlmError> for CrateError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => CrateError::Http(e),
            _ => CrateError::Llm(err.to_string()),
        }
    }
}
