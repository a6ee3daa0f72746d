//! Sidebar link extraction
//!
//! Documentation sites list their pages in navigation regions. This module
//! collects the anchors found inside `<nav>` and `<aside>` elements of the
//! index page and keeps the ones that point to other pages of the same site.

use crate::crawler::fetcher::fetch_index;
use crate::url::{canonicalize_url, same_netloc};
use crate::ScrapeError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Link targets that are downloads rather than pages (case-sensitive suffixes)
const EXCLUDED_EXTENSIONS: &[&str] = &[".pdf", ".zip", ".jpg", ".png"];

/// Anchors nested at any depth inside a navigation region
const SIDEBAR_ANCHORS: &str = "nav a[href], aside a[href]";

/// Extracts the sidebar links of an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` nested inside `<nav>` or `<aside>`
///
/// **Exclude:**
/// - Fragment-only references (`#...`)
/// - Anything containing `mailto:`
/// - Targets ending in `.pdf`, `.zip`, `.jpg` or `.png`
/// - Targets on another network location than `base_url`
///
/// Kept links are resolved against `base_url` and stripped of their query
/// string and fragment.
///
/// # Returns
///
/// Canonical absolute URLs, deduplicated and sorted lexicographically
///
/// # Example
///
/// ```
/// use doc_scraper::crawler::extract_sidebar_links;
/// use url::Url;
///
/// let html = r#"<nav><a href="/b">B</a><a href="/a?x=1">A</a></nav>"#;
/// let base = Url::parse("https://docs.example.com").unwrap();
/// let links = extract_sidebar_links(html, &base);
/// assert_eq!(links, vec!["https://docs.example.com/a", "https://docs.example.com/b"]);
/// ```
pub fn extract_sidebar_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    if let Ok(selector) = Selector::parse(SIDEBAR_ANCHORS) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_sidebar_link(href, base_url) {
                    links.insert(url);
                }
            }
        }
    }

    links.into_iter().collect()
}

/// Resolves one `href` to a canonical same-site URL
///
/// Returns None if the link should be excluded.
fn resolve_sidebar_link(href: &str, base_url: &Url) -> Option<String> {
    if href.starts_with('#') || href.contains("mailto:") {
        return None;
    }

    if EXCLUDED_EXTENSIONS.iter().any(|ext| href.ends_with(ext)) {
        return None;
    }

    let absolute = match base_url.join(href) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Skipping unresolvable link {:?}: {}", href, e);
            return None;
        }
    };

    let canonical = canonicalize_url(absolute);
    if !same_netloc(&canonical, base_url) {
        return None;
    }

    Some(canonical.into())
}

/// Fetches the base URL and returns its sidebar links
///
/// Any failure to fetch the base URL is fatal.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base_url` - The documentation root
pub async fn discover_links(client: &Client, base_url: &Url) -> Result<Vec<String>, ScrapeError> {
    let html = fetch_index(client, base_url.as_str()).await?;
    let links = extract_sidebar_links(&html, base_url);

    tracing::debug!("Found {} sidebar links on {}", links.len(), base_url);

    Ok(links)
}
