//! # scrapedocs - Documentation Site Tooling for Rust
//!
//! This crate collects the pieces needed to turn a documentation website into
//! offline material: a same-domain crawler, page exporters, a PDF toolchain and
//! a small chat-completion client for generating text from prompts.
//!
//! ## Features
//!
//! - Depth-bounded, keyword-filtered crawling restricted to one host
//! - Plain-text and raw HTML export with deterministic file names
//! - Table-of-contents scraping for Sphinx-style documentation
//! - HTML to PDF rendering, PDF merging and PDF to Markdown conversion
//! - Text, JSON and HTML generation through an OpenAI-compatible API
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use scrapedocs::crawler::{CrawlRequest, HttpFetcher, crawl_site};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpFetcher::new(&Default::default())?;
//!     let request = CrawlRequest::new("https://docs.prefect.io/", 1, "concepts")?;
//!
//!     let visited = crawl_site(&fetcher, &request).await?;
//!     for target in visited.iter() {
//!         println!("{}", target);
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod crawler;
pub mod llm;
pub mod pdf;

pub use error::Error;

/// Re-export of the crate error types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
