//! HTTP plumbing for the MediaWiki client
//!
//! This module handles:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Sending GET and form POST requests with retry on transient failures
//! - Decoding JSON responses
//! - Generating page URLs from the API endpoint

use crate::api::ApiError;
use crate::config::{validate_api_url, Config, HttpConfig};
use crate::WikiError;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use url::Url;

/// Username and password used for `action=login`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps a cookie store, since MediaWiki tracks the logged-in
/// session through cookies.
///
/// # Example
///
/// ```no_run
/// use wikicli::api::build_http_client;
/// use wikicli::config::HttpConfig;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for one MediaWiki API endpoint
///
/// Reading pages works anonymously; editing requires credentials and logs in
/// on first use.
pub struct MediaWikiClient {
    pub(crate) http: Client,
    pub(crate) api_url: Url,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) authenticated: AtomicBool,
    max_retries: u32,
    retry_delay: Duration,
}

impl MediaWikiClient {
    /// Creates a client for the given endpoint
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full URL of `api.php`
    /// * `credentials` - Login used for edits, if any
    /// * `http` - Timeouts, retries and user agent
    pub fn new(
        api_url: &str,
        credentials: Option<Credentials>,
        http: &HttpConfig,
    ) -> Result<Self, ApiError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", api_url, e)))?;

        let client = build_http_client(http).map_err(|source| ApiError::Http {
            url: api_url.to_string(),
            source,
        })?;

        Ok(Self {
            http: client,
            api_url,
            credentials,
            authenticated: AtomicBool::new(false),
            max_retries: http.max_retries,
            retry_delay: Duration::from_millis(http.retry_delay_ms),
        })
    }

    /// Creates a client from the `[wiki]` and `[http]` sections of the configuration
    pub fn from_config(config: &Config) -> Result<Self, WikiError> {
        let api_url = config.require_api_url()?;
        validate_api_url(api_url)?;

        let credentials = config
            .require_credentials()
            .ok()
            .map(|(user, pass)| Credentials::new(user, pass));

        Ok(Self::new(api_url, credentials, &config.http)?)
    }

    /// The API endpoint this client talks to
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// True once a login succeeded
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// URL of a page in the wiki's web interface
    ///
    /// Most installations serve pages at `<base>/wiki/<Title>`, where `<base>`
    /// is the API URL without its trailing `api.php`.
    pub fn page_url(&self, title: &str) -> Result<Url, ApiError> {
        let mut url = self.api_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        let mut base: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if base.last().map(String::as_str) == Some("api.php") {
            base.pop();
        }

        let title = title.replace(' ', "_");
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base URL", self.api_url)))?
            .clear()
            .extend(base.iter().map(String::as_str))
            .push("wiki")
            .extend(title.split('/'));

        Ok(url)
    }

    /// Sends a GET request with `format=json` and decodes the response
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .send_with_retry(|| {
                self.http
                    .get(self.api_url.clone())
                    .query(params)
                    .query(&[("format", "json")])
            })
            .await?;
        self.decode(response).await
    }

    /// Sends a form-encoded POST request with `format=json` and decodes the response
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut body: Vec<(&str, &str)> = form.to_vec();
        body.push(("format", "json"));

        let response = self
            .send_with_retry(|| self.http.post(self.api_url.clone()).form(&body))
            .await?;
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let text = response.text().await.map_err(|source| ApiError::Http {
            url: self.api_url.to_string(),
            source,
        })?;
        tracing::trace!("API response: {}", text);
        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Sends a request, retrying transport errors and 5xx responses
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx/3xx | Return the response |
    /// | 4xx | Fail immediately |
    /// | 5xx, timeout, connect error | Retry up to `max-retries` times |
    async fn send_with_retry<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let retryable = match build().send().await {
                Ok(response) if response.status().is_server_error() => ApiError::Status {
                    url: self.api_url.to_string(),
                    status: response.status().as_u16(),
                },
                Ok(response) if response.status().is_client_error() => {
                    return Err(ApiError::Status {
                        url: self.api_url.to_string(),
                        status: response.status().as_u16(),
                    });
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_timeout() || e.is_connect() => ApiError::Http {
                    url: self.api_url.to_string(),
                    source: e,
                },
                Err(e) => {
                    return Err(ApiError::Http {
                        url: self.api_url.to_string(),
                        source: e,
                    });
                }
            };

            if attempt >= self.max_retries {
                return Err(retryable);
            }
            attempt += 1;
            tracing::warn!(
                "Request failed ({}), retrying {}/{} in {:?}",
                retryable,
                attempt,
                self.max_retries,
                self.retry_delay
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}
