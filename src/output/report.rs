//! Crawl report
//!
//! Counters collected by the crawl loop and the summary shown to the user at
//! the end of a run.

use std::fmt;
use std::path::PathBuf;

/// How a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStatus {
    /// Every link was processed and the JSON file was written
    Completed,
    /// Cancelled by the user; Markdown output kept, JSON skipped
    Interrupted,
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlStatus::Completed => write!(f, "completed"),
            CrawlStatus::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Outcome of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub status: CrawlStatus,

    /// Links scheduled for processing, base URL included
    pub pages_total: usize,

    /// Links processed before the loop ended
    pub pages_processed: usize,

    /// Processed links that produced a page block
    pub pages_converted: usize,

    /// Processed links that produced nothing (fetch failure or no content)
    pub pages_empty: usize,

    /// Sections written to the JSON file (0 when interrupted)
    pub sections: usize,

    pub markdown_path: PathBuf,
    pub partial_path: PathBuf,

    /// Present only when the run completed
    pub json_path: Option<PathBuf>,
}

impl CrawlReport {
    /// Returns the share of processed pages that produced content, in percent
    pub fn success_rate(&self) -> f64 {
        if self.pages_processed == 0 {
            return 0.0;
        }
        (self.pages_converted as f64 / self.pages_processed as f64) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.status == CrawlStatus::Completed
    }
}

/// Shown whenever a run ends by user interruption, quiet mode included
pub const INTERRUPTED_NOTICE: &str = "⛔ Interrupted by user. Partial output saved.";

/// Builds the end-of-run summary
///
/// In quiet mode only the interruption notice survives.
pub fn report_lines(report: &CrawlReport, quiet: bool) -> Vec<String> {
    if quiet {
        return if report.is_complete() {
            Vec::new()
        } else {
            vec![INTERRUPTED_NOTICE.to_string()]
        };
    }

    let mut lines = vec![String::new()];
    match report.status {
        CrawlStatus::Completed => {
            lines.push(format!("✓ Markdown saved to: {}", report.markdown_path.display()));
            if let Some(json_path) = &report.json_path {
                lines.push(format!(
                    "✓ JSON version saved to: {} ({} sections)",
                    json_path.display(),
                    report.sections
                ));
            }
        }
        CrawlStatus::Interrupted => {
            lines.push(INTERRUPTED_NOTICE.to_string());
            lines.push(format!("  Partial: {}", report.partial_path.display()));
        }
    }

    lines.push(format!(
        "Pages: {} / {} processed, {} converted, {} empty ({:.1}% with content)",
        report.pages_processed,
        report.pages_total,
        report.pages_converted,
        report.pages_empty,
        report.success_rate()
    ));
    lines
}

/// Prints the crawl report to stdout
pub fn print_report(report: &CrawlReport, quiet: bool) {
    for line in report_lines(report, quiet) {
        println!("{}", line);
    }
}
