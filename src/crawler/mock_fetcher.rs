//! # Mock Page Fetcher for Testing
//!
//! Serves pages from memory and records every URL it was asked for, so tests
//! can assert on traversal without a network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::crawler::error::CrawlError;
use crate::crawler::fetcher::PageFetcher;

/// An in-memory fetcher. Unknown URLs fail like a 404 would.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    failures: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Fail every fetch of `url`
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failures.insert(url.to_string());
        self
    }

    /// URLs fetched so far, in order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    /// How many times `url` was fetched
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetched().iter().filter(|u| u.as_str() == url).count()
    }

    /// Same pages, empty fetch log
    pub fn reset(self) -> Self {
        self.fetched.lock().unwrap().clear();
        self
    }
}

impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        self.fetched.lock().unwrap().push(url.to_string());

        if self.failures.contains(url) {
            return Err(CrawlError::Other(format!("connection refused: {}", url)));
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::Other(format!("HTTP 404 for {}", url)))
    }
}
