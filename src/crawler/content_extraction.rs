//! Content extraction functionality for the crawler module

use scraper::node::Node;
use scraper::{Html, Selector};
use url::Url;

use crate::crawler::{CrawlRequest, CrawlTarget};

/// Elements whose text never belongs to the readable page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Extract the raw `href` values of every anchor, in document order
///
/// # Arguments
///
/// * `html` - The HTML to scan
///
/// # Returns
///
/// The `href` attribute values exactly as written in the markup
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Resolve an `href` into a crawl target if the request accepts it
///
/// Links are joined onto the request's base URL, not the page they were found
/// on. A link is rejected when it cannot be resolved, points at another host,
/// or does not contain the keyword.
pub fn resolve_target(request: &CrawlRequest, href: &str) -> Option<CrawlTarget> {
    let url = request.base_url.join(href).ok()?;
    if !request.is_same_domain(&url) {
        return None;
    }
    if !request.matches_keyword(url.as_str()) {
        return None;
    }
    Some(CrawlTarget::from(url))
}

/// Extract the text content of a page
///
/// Text nodes are concatenated in document order, skipping anything inside
/// `script`, `style` or `noscript`.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_CONTENT_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

/// Parse a URL and return it only if it has a host
pub(crate) fn parse_crawlable(url: &str) -> Option<Url> {
    Url::parse(url).ok().filter(|parsed| parsed.host_str().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_in_document_order() {
        let html = r#"
            <html><body>
                <a href="/b">B</a>
                <a>no href</a>
                <a href="https://example.com/a">A</a>
                <div><a href="c.html">C</a></div>
            </body></html>
        "#;

        assert_eq!(
            extract_links(html),
            vec!["/b", "https://example.com/a", "c.html"]
        );
    }

    #[test]
    fn test_resolve_relative_link_against_base() {
        let request = CrawlRequest::new("https://example.com/docs/", 1, "").unwrap();

        let target = resolve_target(&request, "guide/intro").unwrap();
        assert_eq!(target.as_str(), "https://example.com/docs/guide/intro");

        let target = resolve_target(&request, "/api").unwrap();
        assert_eq!(target.as_str(), "https://example.com/api");
    }

    #[test]
    fn test_resolve_rejects_external_and_special_links() {
        let request = CrawlRequest::new("https://example.com/", 1, "").unwrap();

        assert!(resolve_target(&request, "https://other.com/page").is_none());
        assert!(resolve_target(&request, "mailto:team@example.com").is_none());
        assert!(resolve_target(&request, "javascript:void(0)").is_none());
        assert!(resolve_target(&request, "https://bob@example.com/x").is_none());
    }

    #[test]
    fn test_resolve_applies_keyword() {
        let request = CrawlRequest::new("https://example.com/", 1, "tutorial").unwrap();

        assert!(resolve_target(&request, "/tutorial/start").is_some());
        assert!(resolve_target(&request, "/reference").is_none());
    }

    #[test]
    fn test_resolve_keeps_fragments() {
        let request = CrawlRequest::new("https://example.com/", 1, "").unwrap();

        let target = resolve_target(&request, "#install").unwrap();
        assert_eq!(target.as_str(), "https://example.com/#install");
    }

    #[test]
    fn test_extract_text_skips_scripts_and_styles() {
        let html = r#"
            <html>
                <head><title>Guide</title><style>body { color: red; }</style></head>
                <body>
                    <h1>Install</h1>
                    <script>console.log("hidden");</script>
                    <p>Run the <code>setup</code> command.</p>
                </body>
            </html>
        "#;

        let text = extract_text(html);
        assert!(text.contains("Guide"));
        assert!(text.contains("Install"));
        assert!(text.contains("Run the setup command."));
        assert!(!text.contains("console.log"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_parse_crawlable() {
        assert!(parse_crawlable("https://example.com").is_some());
        assert!(parse_crawlable("mailto:a@example.com").is_none());
        assert!(parse_crawlable("relative/path").is_none());
    }
}
