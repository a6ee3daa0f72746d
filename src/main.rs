//! doc-scraper main entry point
//!
//! This is the command-line interface for the documentation scraper.

use anyhow::Context;
use clap::Parser;
use doc_scraper::config::load_config_or_default;
use doc_scraper::crawler::Coordinator;
use doc_scraper::output::{print_report, FileFailureLog};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// doc-scraper: documentation site to Markdown & JSON
///
/// Crawls the pages linked from a documentation site's navigation, converts
/// their main content to a single Markdown document and derives a JSON list
/// of sections from it.
#[derive(Parser, Debug)]
#[command(name = "doc-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Documentation Site to Markdown & JSON", long_about = None)]
struct Cli {
    /// Base documentation URL
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Delay between requests in seconds [default: 1.0]
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Directory to save outputs [default: .]
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })?;

    // Command line wins over the config file
    if let Some(delay) = cli.delay {
        config.crawler.delay_secs = delay;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.output_dir = output_dir.to_string_lossy().into_owned();
    }

    let failure_log = FileFailureLog::open(Path::new(&config.output.error_log))
        .with_context(|| format!("Failed to open error log {}", config.output.error_log))?;

    let cancel = CancellationToken::new();
    spawn_interrupt_listener(cancel.clone());

    // Rejects an invalid merged configuration
    let coordinator = Coordinator::new(config, &failure_log, cancel)
        .context("Failed to set up the crawler")?
        .with_progress(!cli.quiet);
    let report = coordinator
        .run(&cli.base_url)
        .await
        .with_context(|| format!("Crawl of {} failed", cli.base_url))?;

    print_report(&report, cli.quiet);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_scraper=info,warn"),
            1 => EnvFilter::new("doc_scraper=debug,info"),
            2 => EnvFilter::new("doc_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Cancels the crawl on the first Ctrl-C and exits on the second
///
/// Both paths count as a user interruption and end with status 0.
fn spawn_interrupt_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Could not install Ctrl-C handler");
            return;
        }
        tracing::warn!("Interrupt received, stopping after the current page");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⛔ Interrupted again, exiting immediately. Partial output saved.");
            std::process::exit(0);
        }
    });
}
