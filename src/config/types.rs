use serde::Deserialize;

/// Identifying header sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; generic-doc-scraper/1.0)";

/// Default pause between two page fetches, in seconds
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Main configuration structure for doc-scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause after each page before fetching the next one (seconds)
    #[serde(rename = "delay-secs")]
    pub delay_secs: f64,

    /// Timeout applied to each content page request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            request_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    pub header: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the Markdown and JSON files
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Append-only failure log, resolved against the working directory
    #[serde(rename = "error-log")]
    pub error_log: String,

    /// Name of the safety-net Markdown file inside the output directory
    #[serde(rename = "partial-file-name")]
    pub partial_file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            error_log: "errors.log".to_string(),
            partial_file_name: "docs_partial.md".to_string(),
        }
    }
}
