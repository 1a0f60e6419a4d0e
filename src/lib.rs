//! wikicli: a command-line client for the MediaWiki API
//!
//! This crate fetches, edits and converts wiki pages, and crawls the link
//! graph of a wiki from a starting page with a breadth-first or depth-first
//! strategy, a depth ceiling and a page budget.

pub mod api;
pub mod commands;
pub mod config;
pub mod convert;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for wikicli operations
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] api::ApiError),

    #[error("Output error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("Conversion error: {0}")]
    Convert(#[from] convert::ConvertError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page '{title}' not found or has no content")]
    PageNotFound { title: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("API URL not configured. Run 'wikicli config' first.")]
    MissingApiUrl,

    #[error("Username and password required. Run 'wikicli config' first.")]
    MissingCredentials,

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}

/// Errors raised by the crawl engine itself (as opposed to its collaborators)
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid crawl argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for wikicli operations
pub type Result<T> = std::result::Result<T, WikiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{ApiError, EditOptions, MediaWikiClient};
pub use config::Config;
pub use crawler::{CrawlStats, Crawler, LinkGraphSource, Strategy};
pub use output::{ConsoleSink, FileSink, PageSink};
