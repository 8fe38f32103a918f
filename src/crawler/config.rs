//! # Crawler Configuration Module
//!
//! Configuration for the crawler and the HTTP fetcher behind it, built with a
//! builder pattern.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: Depth bound, keyword filter and HTTP client settings
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration

use std::time::Duration;

/// Default crawl depth used by the CLI
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl
    pub max_depth: u32,

    /// Substring a discovered URL must contain to be kept
    pub keyword: String,

    /// User agent to use for requests
    pub user_agent: String,

    /// Per-request timeout; `None` keeps the HTTP client's default
    pub request_timeout: Option<Duration>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            keyword: String::new(),
            user_agent: format!("scrapedocs/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: None,
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum depth to crawl
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the keyword filter
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.keyword = keyword.into();
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set a per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }
}
