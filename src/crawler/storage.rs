//! Page exporter: writes page text or HTML under an output directory
//!
//! File names are derived from the URL so that every page lands at a stable
//! location. Export failures are reported per page and never abort a batch.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info, instrument};

use crate::crawler::content_extraction::extract_text;
use crate::crawler::fetcher::PageFetcher;
use crate::error::Result;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base path for storage
    pub base_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("./output"),
        }
    }
}

/// Storage manager for exported pages
#[derive(Debug, Clone)]
pub struct Storage {
    config: StorageConfig,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    /// Create a new storage with default configuration
    pub fn new() -> Self {
        Self {
            config: StorageConfig::default(),
        }
    }

    /// Create a new storage with custom configuration
    pub fn with_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Create a storage rooted at `base_path`
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self::with_config(StorageConfig {
            base_path: base_path.into(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    /// Path of the text export for `url`
    pub fn text_path(&self, url: &str) -> PathBuf {
        self.config
            .base_path
            .join(format!("{}.txt", file_stem_for_url(url)))
    }

    /// Path of the HTML export for a page titled `title`
    pub fn html_path(&self, title: &str) -> PathBuf {
        self.config
            .base_path
            .join(format!("{}.html", file_stem_for_title(title)))
    }

    /// Write `contents` to `path`, creating the storage directory first
    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.config.base_path).await?;
        fs::write(path, contents).await?;
        Ok(())
    }

    /// Fetch a page and store its text content
    ///
    /// # Returns
    ///
    /// The path the text was written to
    #[instrument(skip(self, fetcher), level = "debug")]
    pub async fn export_text<F: PageFetcher>(&self, fetcher: &F, url: &str) -> Result<PathBuf> {
        let html = fetcher.fetch(url).await?;
        let text = extract_text(&html);

        let path = self.text_path(url);
        self.write(&path, &text).await?;

        info!("Saved {} as {}", url, path.display());
        Ok(path)
    }

    /// Fetch a page and store its raw HTML under a title-derived name
    #[instrument(skip(self, fetcher), level = "debug")]
    pub async fn export_html<F: PageFetcher>(
        &self,
        fetcher: &F,
        url: &str,
        title: &str,
    ) -> Result<PathBuf> {
        let html = fetcher.fetch(url).await?;

        let path = self.html_path(title);
        self.write(&path, &html).await?;

        info!("Saved {}", path.display());
        Ok(path)
    }

    /// Export the text of every URL, logging and skipping failures
    ///
    /// # Returns
    ///
    /// The paths that were written, in input order
    pub async fn export_all<F, I, S>(&self, fetcher: &F, urls: I) -> Vec<PathBuf>
    where
        F: PageFetcher,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut saved = Vec::new();
        for url in urls {
            let url = url.as_ref();
            match self.export_text(fetcher, url).await {
                Ok(path) => saved.push(path),
                Err(e) => error!("Error saving {}: {}", url, e),
            }
        }
        saved
    }
}

/// Derive a filesystem-safe, collision-free file stem from a URL
///
/// A leading `https://` or `http://` is dropped and `/` becomes `_`. ASCII
/// alphanumerics, `.` and `-` are kept; every other byte is written as `%XX`,
/// which keeps the mapping injective for URLs of the same scheme.
pub fn file_stem_for_url(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let mut stem = String::with_capacity(rest.len());
    for byte in rest.bytes() {
        match byte {
            b'/' => stem.push('_'),
            b'.' | b'-' => stem.push(byte as char),
            b if b.is_ascii_alphanumeric() => stem.push(b as char),
            b => stem.push_str(&format!("%{:02X}", b)),
        }
    }
    stem
}

/// Derive a file stem from a page title; spaces become `_`
pub fn file_stem_for_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}
