//! Same-domain, depth-bounded site traversal
//!
//! Traversal is depth-first and visits links in the order they appear in the
//! markup. Instead of recursing, every fetched page becomes a frame on an
//! explicit stack holding the links it has left to process, which reproduces
//! the recursive visiting order exactly.
//!
//! Depth guard: a page at depth `d` is fetched only if `d <= max_depth`, and
//! its links are recorded before that check runs for them. Links found on the
//! deepest fetched pages are therefore returned without being fetched, and with
//! `max_depth = 0` the result is the matching links of the start page.

use tracing::{debug, error, info, instrument};

use crate::crawler::content_extraction::{extract_links, parse_crawlable, resolve_target};
use crate::crawler::error::CrawlError;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::{CrawlRequest, CrawlerConfig, VisitedSet};

/// A fetched page whose links are still being processed
struct Frame {
    depth: u32,
    links: std::vec::IntoIter<String>,
}

/// Crawl starting from the request's base URL
pub async fn crawl_site<F: PageFetcher>(
    fetcher: &F,
    request: &CrawlRequest,
) -> Result<VisitedSet, CrawlError> {
    let start = request.base_url.to_string();
    crawl_from(fetcher, request, &start).await
}

/// Crawl starting from `start_url`, keeping the request's domain boundary
///
/// The start URL itself is only part of the result if a crawled page links to
/// it. Fetch failures are logged and end that branch only.
#[instrument(skip(fetcher, request), fields(base = %request.base_url, max_depth = request.max_depth))]
pub async fn crawl_from<F: PageFetcher>(
    fetcher: &F,
    request: &CrawlRequest,
    start_url: &str,
) -> Result<VisitedSet, CrawlError> {
    let start = parse_crawlable(start_url)
        .ok_or_else(|| CrawlError::InvalidUrl(start_url.to_string()))?;

    let mut visited = VisitedSet::new();
    let mut stack = Vec::new();

    if let Some(frame) = visit(fetcher, request, start.as_str(), 0).await {
        stack.push(frame);
    }

    loop {
        let (href, depth) = match stack.last_mut() {
            None => break,
            Some(frame) => match frame.links.next() {
                Some(href) => (href, frame.depth),
                None => {
                    stack.pop();
                    continue;
                }
            },
        };

        let Some(target) = resolve_target(request, &href) else {
            continue;
        };
        if !visited.insert(target.clone()) {
            continue;
        }

        info!("Found: {}", target);

        if let Some(frame) = visit(fetcher, request, target.as_str(), depth + 1).await {
            stack.push(frame);
        }
    }

    info!("Crawl finished with {} page(s)", visited.len());
    Ok(visited)
}

/// Fetch a page at `depth` and turn it into a frame
///
/// Returns `None` when the depth guard fires or the fetch fails.
async fn visit<F: PageFetcher>(
    fetcher: &F,
    request: &CrawlRequest,
    url: &str,
    depth: u32,
) -> Option<Frame> {
    if depth > request.max_depth {
        return None;
    }

    match fetcher.fetch(url).await {
        Ok(html) => {
            let links = extract_links(&html);
            debug!("{} link(s) on {} at depth {}", links.len(), url, depth);
            Some(Frame {
                depth,
                links: links.into_iter(),
            })
        }
        Err(e) => {
            error!("Error fetching {}: {}", url, e);
            None
        }
    }
}

/// Crawl a website over HTTP with the given configuration
///
/// # Arguments
///
/// * `url` - The base URL; also the start of the traversal
/// * `config` - The crawler configuration
///
/// # Returns
///
/// Every discovered same-domain URL that matches the keyword
pub async fn crawl_website(url: &str, config: &CrawlerConfig) -> Result<VisitedSet, CrawlError> {
    info!("Starting crawl for {}", url);
    debug!("Crawler config: {:?}", config);

    let fetcher = HttpFetcher::new(config)?;
    let request = CrawlRequest::from_config(url, config)?;
    crawl_site(&fetcher, &request).await
}
