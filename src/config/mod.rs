//! Configuration module for doc-scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a run without a config
//! file behaves like the plain command line.
//!
//! # Example
//!
//! ```no_run
//! use doc_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Delay between pages: {}s", config.crawler.delay_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_DELAY_SECS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
