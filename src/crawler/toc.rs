//! Table-of-contents scraping for Sphinx-style documentation
//!
//! The TOC lives in `div.toctree-wrapper`; each anchor inside it becomes a
//! `TocEntry`. Entries are persisted as JSON so the HTML download step can be
//! rerun without scraping again.

use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use url::Url;

use crate::crawler::error::CrawlError;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::storage::Storage;

/// One entry of a table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Link")]
    pub link: String,
}

/// Parse TOC entries out of a page
///
/// Links beginning with `/` are prefixed with `url` (without its trailing
/// slash); every other link is kept as written.
pub fn parse_toc(html: &str, url: &str) -> Result<Vec<TocEntry>, CrawlError> {
    let document = Html::parse_document(html);

    let section_selector = Selector::parse("div.toctree-wrapper")
        .map_err(|e| CrawlError::HtmlParse(format!("Failed to parse TOC selector: {}", e)))?;
    let link_selector = Selector::parse("a[href]")
        .map_err(|e| CrawlError::HtmlParse(format!("Failed to parse link selector: {}", e)))?;

    let section = document.select(&section_selector).next().ok_or_else(|| {
        CrawlError::ContentExtraction("Failed to locate the Table of Contents section".to_string())
    })?;

    let entries = section
        .select(&link_selector)
        .filter_map(|item| {
            let href = item.value().attr("href")?;
            let link = if href.starts_with('/') {
                format!("{}{}", url.trim_end_matches('/'), href)
            } else {
                href.to_string()
            };
            Some(TocEntry {
                title: item.text().collect::<String>(),
                link,
            })
        })
        .collect();

    Ok(entries)
}

/// Fetch a page and scrape its table of contents
#[instrument(skip(fetcher))]
pub async fn scrape_toc<F: PageFetcher>(fetcher: &F, url: &str) -> Result<Vec<TocEntry>, CrawlError> {
    let html = fetcher.fetch(url).await?;
    let entries = parse_toc(&html, url)?;
    info!("Scraped {} TOC entries from {}", entries.len(), url);
    Ok(entries)
}

/// Write TOC entries to `path` as pretty JSON
pub async fn save_toc(entries: &[TocEntry], path: &Path) -> Result<(), CrawlError> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| CrawlError::Other(format!("Failed to serialize TOC: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;

    info!("Saved TOC to {}", path.display());
    Ok(())
}

/// Read TOC entries written by `save_toc`
pub async fn load_toc(path: &Path) -> Result<Vec<TocEntry>, CrawlError> {
    let json = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&json)
        .map_err(|e| CrawlError::Other(format!("Failed to parse TOC {}: {}", path.display(), e)))
}

/// Resolve a TOC link into the URL to download
fn entry_url(base: &Url, link: &str) -> Option<Url> {
    Url::parse(link).or_else(|_| base.join(link)).ok()
}

/// Save the HTML of every TOC entry, logging and skipping failures
///
/// # Returns
///
/// The paths that were written
pub async fn save_html_from_toc<F: PageFetcher>(
    fetcher: &F,
    entries: &[TocEntry],
    output_dir: &Path,
    url: &str,
) -> Result<Vec<PathBuf>, CrawlError> {
    // Relative links resolve below the documentation root
    let base = Url::parse(&format!("{}/", url.trim_end_matches('/')))?;
    let storage = Storage::at(output_dir);
    tokio::fs::create_dir_all(output_dir).await?;

    let mut saved = Vec::new();
    for entry in entries {
        let Some(page_url) = entry_url(&base, &entry.link) else {
            warn!("Skipping TOC entry '{}' with invalid link {}", entry.title, entry.link);
            continue;
        };

        match storage
            .export_html(fetcher, page_url.as_str(), &entry.title)
            .await
        {
            Ok(path) => saved.push(path),
            Err(e) => error!("Failed to retrieve {}: {}", entry.link, e),
        }
    }

    Ok(saved)
}
