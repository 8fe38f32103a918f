//! # Website Crawler Module
//!
//! This module discovers pages on a documentation site and exports them. It is
//! the first stage of every workflow in the crate: the CLI either prints the
//! discovered URLs or hands them to the storage layer.
//!
//! ## Key Components
//!
//! - `CrawlRequest`: Base URL, depth bound and keyword filter for one crawl
//! - `CrawlTarget` / `VisitedSet`: Normalized URLs and the dedup set they live in
//! - `PageFetcher`: The seam between traversal and the network
//! - `crawl_site` / `crawl_from`: Depth-first, same-domain traversal
//! - `Storage`: Writes page text or HTML under an output directory
//! - `scrape_toc`: Reads a Sphinx table of contents into entries
//!
//! ## Usage
//!
//! Fetch failures never abort a crawl. They are logged and the affected branch
//! simply contributes no further links.

mod config;
mod content_extraction;
mod error;
mod fetcher;
mod site_crawler;
pub mod storage;
mod toc;

#[cfg(test)]
pub(crate) mod mock_fetcher;

pub use config::{CrawlerConfig, CrawlerConfigBuilder, DEFAULT_MAX_DEPTH};
pub use content_extraction::{extract_links, extract_text, resolve_target};
pub use error::CrawlError;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use site_crawler::{crawl_from, crawl_site, crawl_website};
pub use storage::{Storage, StorageConfig};
pub use toc::{TocEntry, load_toc, parse_toc, save_html_from_toc, save_toc, scrape_toc};

use std::collections::HashSet;
use std::fmt;
use url::Url;

/// A normalized absolute URL considered for visiting
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrawlTarget(String);

impl CrawlTarget {
    /// The normalized URL
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Url> for CrawlTarget {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CrawlTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Set of targets discovered during one crawl
///
/// Targets are only ever added. Iteration follows discovery order.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    seen: HashSet<CrawlTarget>,
    order: Vec<CrawlTarget>,
}

impl VisitedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a target, returning `false` if it was already present
    pub fn insert(&mut self, target: CrawlTarget) -> bool {
        if self.seen.contains(&target) {
            return false;
        }
        self.seen.insert(target.clone());
        self.order.push(target);
        true
    }

    /// Whether the target has been visited
    pub fn contains(&self, target: &CrawlTarget) -> bool {
        self.seen.contains(target)
    }

    /// Whether a URL string has been visited
    pub fn contains_url(&self, url: &str) -> bool {
        self.seen.contains(&CrawlTarget(url.to_string()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate targets in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &CrawlTarget> {
        self.order.iter()
    }
}

impl IntoIterator for VisitedSet {
    type Item = CrawlTarget;
    type IntoIter = std::vec::IntoIter<CrawlTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

/// Immutable input for one crawl
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Defines the allowed host and the base that links are resolved against
    pub base_url: Url,

    /// Pages deeper than this are not fetched
    pub max_depth: u32,

    /// Substring every accepted URL must contain; empty accepts everything
    pub keyword: String,
}

impl CrawlRequest {
    /// Build a request from a base URL string
    pub fn new(
        base_url: &str,
        max_depth: u32,
        keyword: impl Into<String>,
    ) -> Result<Self, CrawlError> {
        let base_url = Url::parse(base_url)?;
        if base_url.host_str().is_none() {
            return Err(CrawlError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            max_depth,
            keyword: keyword.into(),
        })
    }

    /// Build a request from the crawler configuration
    pub fn from_config(base_url: &str, config: &CrawlerConfig) -> Result<Self, CrawlError> {
        Self::new(base_url, config.max_depth, config.keyword.clone())
    }

    /// Whether `url` has the same network location as the base URL
    ///
    /// Host, explicit port and userinfo must all match.
    pub fn is_same_domain(&self, url: &Url) -> bool {
        url.host_str() == self.base_url.host_str()
            && url.port() == self.base_url.port()
            && url.username() == self.base_url.username()
            && url.password() == self.base_url.password()
    }

    /// Whether `url` passes the keyword filter
    pub fn matches_keyword(&self, url: &str) -> bool {
        url.contains(self.keyword.as_str())
    }
}
