use crate::crawler::Strategy;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Placeholder shown instead of the stored password
pub const MASKED_PASSWORD: &str = "********";

/// Main configuration structure for wikicli
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wiki: WikiConfig,
    pub http: HttpConfig,
    pub crawl: CrawlDefaults,
}

/// Connection settings for the target wiki
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// MediaWiki API endpoint, e.g. `https://example.org/w/api.php`
    #[serde(rename = "api-url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// HTTP client behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Retries after a transport error or 5xx response
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay between retries (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("wikicli/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }
}

/// Defaults for the `crawl` command when flags are omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlDefaults {
    /// Link depth to crawl
    pub depth: u32,

    /// Maximum number of pages to process
    pub limit: u32,

    pub strategy: Strategy,
}

impl Default for CrawlDefaults {
    fn default() -> Self {
        Self {
            depth: 1,
            limit: 100,
            strategy: Strategy::BreadthFirst,
        }
    }
}

impl Config {
    /// Returns the configured API URL or an error telling the user to configure one
    pub fn require_api_url(&self) -> ConfigResult<&str> {
        self.wiki
            .api_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingApiUrl)
    }

    /// Returns `(username, password)` or an error if either is missing
    pub fn require_credentials(&self) -> ConfigResult<(&str, &str)> {
        match (self.wiki.username.as_deref(), self.wiki.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Ok((user, pass)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// Returns a copy safe for display, with the password replaced
    pub fn masked(&self) -> Config {
        let mut display = self.clone();
        if display.wiki.password.is_some() {
            display.wiki.password = Some(MASKED_PASSWORD.to_string());
        }
        display
    }

    /// Overlays non-empty values onto the wiki section
    pub fn merge_wiki(
        &mut self,
        api_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        if let Some(url) = non_empty(api_url) {
            self.wiki.api_url = Some(url);
        }
        if let Some(user) = non_empty(username) {
            self.wiki.username = Some(user);
        }
        if let Some(pass) = non_empty(password) {
            self.wiki.password = Some(pass);
        }
    }
}
