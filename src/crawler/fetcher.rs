//! Page fetching for the crawler
//!
//! The crawler only ever talks to a `PageFetcher`. The production
//! implementation is a thin wrapper over `reqwest`.

use std::future::Future;

use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};

use crate::crawler::config::CrawlerConfig;
use crate::crawler::error::CrawlError;

/// Fetches the raw HTML of a page
pub trait PageFetcher {
    /// Fetch `url`, failing on transport errors and non-success statuses
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, CrawlError>> + Send;
}

/// HTTP implementation of `PageFetcher`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ReqwestClient,
}

impl HttpFetcher {
    /// Create a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let mut builder = ReqwestClient::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        debug!("Sending GET request to {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        debug!("Received {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
