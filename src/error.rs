//! Error types for the scrapedocs crate

use thiserror::Error;

/// Result type for scrapedocs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scrapedocs operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// PDF conversion error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Language model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
