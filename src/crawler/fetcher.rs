//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the identifying user agent
//! - Fetching the index page, where any failure is fatal
//! - Fetching content pages, where failures are reported as values

use crate::config::UserAgentConfig;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching a content page
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// Canonical reason phrase, if known
        reason: Option<&'static str>,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Describes why the fetch failed, or `None` on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::HttpError {
                status_code,
                reason: Some(reason),
            } => Some(format!("HTTP {} {}", status_code, reason)),
            FetchResult::HttpError {
                status_code,
                reason: None,
            } => Some(format!("HTTP {}", status_code)),
            FetchResult::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured `User-Agent` with every request, keeps
/// reqwest's default redirect policy and ignores proxy environment
/// variables. No client-wide timeout is set; content page fetches apply
/// their own per-request timeout.
///
/// # Example
///
/// ```no_run
/// use doc_scraper::config::UserAgentConfig;
/// use doc_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header.as_str())
        .no_proxy()
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the index page used for link discovery
///
/// Network errors and non-success statuses are returned as errors and abort
/// the crawl. There is no retry and no explicit timeout.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The base URL
///
/// # Returns
///
/// * `Ok(String)` - The page body
/// * `Err(ScrapeError)` - The request failed
pub async fn fetch_index(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| ScrapeError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetches a content page
///
/// Never fails: every outcome, including errors, is described by the
/// returned [`FetchResult`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Upper bound for the whole request
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return network_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            reason: status.canonical_reason(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => network_error(e),
    }
}

/// Classifies a transport-level error
fn network_error(e: reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
