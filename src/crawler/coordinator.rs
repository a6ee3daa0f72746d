//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Normalizing the base URL and deriving output file names
//! - Discovering the pages to process from the index page sidebar
//! - Converting pages one at a time, with a pause between pages
//! - Mirroring the result into the full and partial Markdown files
//! - Stopping cleanly on cancellation
//! - Generating the JSON sections file

use crate::config::{validate, Config};
use crate::crawler::content::{build_markdown_converter, fetch_and_convert};
use crate::crawler::links::discover_links;
use crate::crawler::rate_limiter::RateLimiter;
use crate::crawler::build_http_client;
use crate::output::{convert_md_to_json, CrawlReport, CrawlStatus, FailureLog, MarkdownOutput};
use crate::url::{domain_label, normalize_base_url};
use crate::ScrapeError;
use chrono::Local;
use htmd::HtmlToMarkdown;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Locations of the files produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub markdown: PathBuf,
    pub json: PathBuf,
    pub partial: PathBuf,
}

impl OutputPaths {
    /// Builds the output file paths
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory receiving every file
    /// * `domain` - Domain label of the crawled site
    /// * `date_stamp` - Run date as `YYYYMMDD`
    /// * `partial_file_name` - Fixed name of the safety-net file
    pub fn new(output_dir: &Path, domain: &str, date_stamp: &str, partial_file_name: &str) -> Self {
        Self {
            markdown: output_dir.join(format!("docs_{}_{}.md", domain, date_stamp)),
            json: output_dir.join(format!("docs_{}_{}.json", domain, date_stamp)),
            partial: output_dir.join(partial_file_name),
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<'a> {
    config: Config,
    client: Client,
    converter: HtmlToMarkdown,
    failure_log: &'a dyn FailureLog,
    cancel: CancellationToken,
    show_progress: bool,
}

impl<'a> Coordinator<'a> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `failure_log` - Receives recoverable per-page failures
    /// * `cancel` - Stops the crawl loop at the next page boundary when cancelled
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid configuration, or the HTTP client could not be built
    pub fn new(
        config: Config,
        failure_log: &'a dyn FailureLog,
        cancel: CancellationToken,
    ) -> Result<Self, ScrapeError> {
        validate(&config)?;
        let client = build_http_client(&config.user_agent)?;

        Ok(Self {
            config,
            client,
            converter: build_markdown_converter(),
            failure_log,
            cancel,
            show_progress: false,
        })
    }

    /// Enables or disables the terminal progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Runs a complete crawl of the site rooted at `base_url`
    ///
    /// This method:
    /// 1. Normalizes the base URL and derives the output paths
    /// 2. Discovers the sidebar links (fatal on failure)
    /// 3. Converts every link in order, pausing between pages
    /// 4. Writes the JSON sections file if the run was not cancelled
    ///
    /// Cancellation during discovery returns before any output file is
    /// opened, so files from a previous run are left as they were.
    pub async fn run(&self, base_url: &str) -> Result<CrawlReport, ScrapeError> {
        let (base, parsed_base) = normalize_base_url(base_url)?;
        let domain = domain_label(&parsed_base);
        let date_stamp = Local::now().format("%Y%m%d").to_string();

        let output_dir = Path::new(&self.config.output.output_dir);
        std::fs::create_dir_all(output_dir)?;

        let paths = OutputPaths::new(
            output_dir,
            &domain,
            &date_stamp,
            &self.config.output.partial_file_name,
        );

        tracing::info!("Crawling documentation structure of {}", base);
        let discovered = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            links = discover_links(&self.client, &parsed_base) => Some(links?),
        };
        let Some(mut links) = discovered else {
            tracing::warn!("Crawl interrupted during link discovery, no output written");
            return Ok(CrawlReport {
                status: CrawlStatus::Interrupted,
                pages_total: 0,
                pages_processed: 0,
                pages_converted: 0,
                pages_empty: 0,
                sections: 0,
                markdown_path: paths.markdown,
                partial_path: paths.partial,
                json_path: None,
            });
        };
        if !links.contains(&base) {
            links.insert(0, base.clone());
        }
        tracing::info!("Found {} links to process", links.len());

        let mut output = MarkdownOutput::create(&paths.markdown, &paths.partial)?;
        let counts = self.process_links(&links, &mut output).await?;
        output.finish()?;

        let status = if self.cancel.is_cancelled() {
            CrawlStatus::Interrupted
        } else {
            CrawlStatus::Completed
        };

        let (json_path, sections) = match status {
            CrawlStatus::Completed => {
                let sections = convert_md_to_json(&paths.markdown, &paths.json)?;
                (Some(paths.json.clone()), sections)
            }
            CrawlStatus::Interrupted => {
                tracing::warn!(
                    "Crawl interrupted after {} of {} pages, skipping JSON conversion",
                    counts.processed,
                    links.len()
                );
                (None, 0)
            }
        };

        tracing::info!("Crawl {}: {} pages processed", status, counts.processed);

        Ok(CrawlReport {
            status,
            pages_total: links.len(),
            pages_processed: counts.processed,
            pages_converted: counts.converted,
            pages_empty: counts.processed - counts.converted,
            sections,
            markdown_path: paths.markdown,
            partial_path: paths.partial,
            json_path,
        })
    }

    /// Converts each link in sequence and appends the result to the output
    ///
    /// Cancellation is checked before each page; a page already in flight is
    /// always finished and written.
    async fn process_links(
        &self,
        links: &[String],
        output: &mut MarkdownOutput,
    ) -> Result<PageCounts, ScrapeError> {
        let timeout = Duration::from_secs(self.config.crawler.request_timeout_secs);
        let mut limiter = RateLimiter::from_secs_f64(self.config.crawler.delay_secs);
        let progress = self.progress_bar(links.len());
        let mut counts = PageCounts::default();

        for link in links {
            if self.cancel.is_cancelled() {
                break;
            }

            let markdown =
                fetch_and_convert(&self.client, &self.converter, link, timeout, self.failure_log).await;
            output.write_page(&markdown)?;

            counts.processed += 1;
            if !markdown.is_empty() {
                counts.converted += 1;
            }
            tracing::debug!("Processed {} ({} bytes)", link, markdown.len());
            progress.inc(1);

            // Pause even after a failed page
            limiter.record_completion();
            if !limiter.wait(&self.cancel).await {
                break;
            }
        }

        progress.finish_and_clear();
        Ok(counts)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("Processing pages [{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar
    }
}

/// Per-run page counters
#[derive(Debug, Default, Clone, Copy)]
struct PageCounts {
    processed: usize,
    converted: usize,
}

/// Runs a complete crawl with a fresh coordinator
///
/// # Example
///
/// ```no_run
/// use doc_scraper::config::Config;
/// use doc_scraper::crawler::run_crawl;
/// use doc_scraper::output::FileFailureLog;
/// use std::path::Path;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let log = FileFailureLog::open(Path::new("errors.log"))?;
/// let report = run_crawl("https://docs.example.com/", Config::default(), &log, CancellationToken::new()).await?;
/// println!("{} pages", report.pages_processed);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    base_url: &str,
    config: Config,
    failure_log: &dyn FailureLog,
    cancel: CancellationToken,
) -> Result<CrawlReport, ScrapeError> {
    let coordinator = Coordinator::new(config, failure_log, cancel)?;
    coordinator.run(base_url).await
}
