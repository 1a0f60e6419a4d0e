use crate::config::types::{Config, CrawlDefaults, HttpConfig, WikiConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_wiki_config(&config.wiki)?;
    validate_http_config(&config.http)?;
    validate_crawl_defaults(&config.crawl)?;
    Ok(())
}

/// Validates the wiki connection settings
fn validate_wiki_config(config: &WikiConfig) -> Result<(), ConfigError> {
    if let Some(api_url) = config.api_url.as_deref() {
        validate_api_url(api_url)?;
    }
    Ok(())
}

/// Validates that the API endpoint is an absolute http(s) URL
pub fn validate_api_url(api_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(api_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-url '{}': {}", api_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "api-url '{}' must use http or https",
            api_url
        )));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates crawl defaults
fn validate_crawl_defaults(config: &CrawlDefaults) -> Result<(), ConfigError> {
    // depth >= 0 is always true for u32

    if config.limit < 1 {
        return Err(ConfigError::Validation(format!(
            "crawl limit must be >= 1, got {}",
            config.limit
        )));
    }

    Ok(())
}
