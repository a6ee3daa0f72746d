//! Output module for writing crawl results
//!
//! This module handles:
//! - Writing converted pages to the full and partial Markdown files
//! - Splitting the Markdown document into JSON sections
//! - Recording recoverable failures in the append-only error log
//! - Summarizing a crawl run for the user

mod error_log;
mod markdown;
mod report;
mod sections;
mod traits;

pub use error_log::FileFailureLog;
pub use markdown::MarkdownOutput;
pub use report::{print_report, report_lines, CrawlReport, CrawlStatus, INTERRUPTED_NOTICE};
pub use sections::{convert_md_to_json, parse_sections, sections_to_json, Section};
pub use traits::{FailureLog, OutputError, OutputResult};
