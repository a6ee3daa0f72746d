//! Crawler module for page fetching and processing
//!
//! This module contains the crawling pipeline, including:
//! - HTTP fetching with a fatal (index) and a non-fatal (content) flavor
//! - Sidebar link extraction
//! - Main content selection and Markdown conversion
//! - Rate limiting between pages
//! - Overall crawl coordination

mod content;
mod coordinator;
mod fetcher;
mod links;
mod rate_limiter;

pub use content::{
    build_markdown_converter, convert_page, extract_title, fetch_and_convert, select_main_content,
    ContentError, ConvertedPage, PAGE_SEPARATOR,
};
pub use coordinator::{run_crawl, Coordinator, OutputPaths};
pub use fetcher::{build_http_client, fetch_index, fetch_page, FetchResult};
pub use links::{discover_links, extract_sidebar_links};
pub use rate_limiter::RateLimiter;
