use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !config.delay_secs.is_finite() || config.delay_secs < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay-secs must be a non-negative number of seconds, got {}",
            config.delay_secs
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.header.trim().is_empty() {
        return Err(ConfigError::Validation(
            "[user-agent] header cannot be empty".to_string(),
        ));
    }

    // Must be usable as an HTTP header value
    if config.header.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "[user-agent] header contains control characters: {:?}",
            config.header
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    if config.error_log.is_empty() {
        return Err(ConfigError::Validation(
            "error-log cannot be empty".to_string(),
        ));
    }

    validate_file_name(&config.partial_file_name)?;

    Ok(())
}

/// The partial file lives directly inside the output directory
fn validate_file_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "partial-file-name cannot be empty".to_string(),
        ));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "partial-file-name must be a plain file name, got '{}'",
            name
        )));
    }

    Ok(())
}
