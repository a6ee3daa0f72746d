//! Main content extraction and Markdown conversion
//!
//! Picks the element holding a page's readable body, finds a title for it and
//! turns the element into a Markdown page block:
//!
//! ```text
//! # {title}
//!
//! {body}
//!
//! ---
//! ```

use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::output::FailureLog;
use htmd::options::{HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;

/// Separator closing every page block
pub const PAGE_SEPARATOR: &str = "---";

/// Reasons a fetched page yields no page block
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("No readable content found on {url}")]
    NoReadableContent { url: String },

    #[error("Failed to convert {url} to Markdown: {source}")]
    Conversion { url: String, source: std::io::Error },
}

/// A page converted to Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedPage {
    pub title: String,
    /// Markdown body, trimmed
    pub body: String,
}

impl ConvertedPage {
    /// Renders the page block appended to the output document
    pub fn to_markdown(&self) -> String {
        format!("# {}\n\n{}\n\n{}\n", self.title, self.body, PAGE_SEPARATOR)
    }
}

/// Selects the main content element of a document
///
/// 1. The first `<main>` element, if any
/// 2. Otherwise, among all `<article>` elements followed by all
///    `div.theme-doc-markdown` elements, the one with the longest serialized
///    HTML (the earliest wins a tie)
pub fn select_main_content(document: &Html) -> Option<ElementRef<'_>> {
    if let Some(main) = select_first(document, "main") {
        return Some(main);
    }

    let mut candidates = Vec::new();
    for css in ["article", "div.theme-doc-markdown"] {
        if let Ok(selector) = Selector::parse(css) {
            candidates.extend(document.select(&selector));
        }
    }

    let mut best: Option<(usize, ElementRef<'_>)> = None;
    for candidate in candidates {
        let size = candidate.html().chars().count();
        match best {
            Some((best_size, _)) if best_size >= size => {}
            _ => best = Some((size, candidate)),
        }
    }

    best.map(|(_, element)| element)
}

/// Picks the page title
///
/// The first `<h1>`, else the first `<h2>`, else `<title>`, else the URL
/// itself. The first element found wins even when its text is empty.
pub fn extract_title(document: &Html, url: &str) -> String {
    if let Some(heading) = select_first(document, "h1").or_else(|| select_first(document, "h2")) {
        return stripped_text(heading);
    }

    match select_first(document, "title") {
        Some(title) => title.text().collect::<String>().trim().to_string(),
        None => url.to_string(),
    }
}

/// Builds the HTML to Markdown converter shared by every page of a crawl
///
/// Headings are written `#`-style; `<script>` and `<style>` are dropped.
pub fn build_markdown_converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style"])
        .options(Options {
            heading_style: HeadingStyle::Atx,
            ..Default::default()
        })
        .build()
}

/// Converts a fetched HTML document into a page
///
/// # Arguments
///
/// * `converter` - Converter from [`build_markdown_converter`]
/// * `html` - The page source
/// * `url` - The page URL, used as the title of last resort
///
/// # Returns
///
/// * `Ok(ConvertedPage)` - Title and Markdown body
/// * `Err(ContentError)` - No content element, or conversion failed
pub fn convert_page(
    converter: &HtmlToMarkdown,
    html: &str,
    url: &str,
) -> Result<ConvertedPage, ContentError> {
    let document = Html::parse_document(html);

    let content = select_main_content(&document).ok_or_else(|| ContentError::NoReadableContent {
        url: url.to_string(),
    })?;

    let title = extract_title(&document, url);
    let markdown = converter.convert(&content.html()).map_err(|source| ContentError::Conversion {
        url: url.to_string(),
        source,
    })?;

    Ok(ConvertedPage {
        title,
        body: markdown.trim().to_string(),
    })
}

/// Fetches a page and converts it to a Markdown page block
///
/// Failures are recorded in `failure_log` and produce an empty string, so a
/// broken page never stops the crawl.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `converter` - Converter from [`build_markdown_converter`]
/// * `url` - The page to fetch
/// * `timeout` - Request timeout
/// * `failure_log` - Where failures are recorded
pub async fn fetch_and_convert(
    client: &Client,
    converter: &HtmlToMarkdown,
    url: &str,
    timeout: Duration,
    failure_log: &dyn FailureLog,
) -> String {
    let body = match fetch_page(client, url, timeout).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            tracing::debug!("Fetched {} (HTTP {}, final URL {})", url, status_code, final_url);
            body
        }
        failed => {
            let reason = failed.failure_reason().unwrap_or_default();
            failure_log.record_failure(url, &format!("Failed to fetch {}: {}", url, reason));
            return String::new();
        }
    };

    match convert_page(converter, &body, url) {
        Ok(page) => page.to_markdown(),
        Err(e) => {
            failure_log.record_failure(url, &e.to_string());
            String::new()
        }
    }
}

/// Returns the first element matching `css`
fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Joins the element's text nodes, each trimmed, dropping empty ones
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
