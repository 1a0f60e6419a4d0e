//! Configuration module for wikicli
//!
//! This module handles loading, validating and saving the TOML configuration
//! file that holds the API endpoint, credentials, HTTP settings and crawl
//! defaults.
//!
//! # Example
//!
//! ```no_run
//! use wikicli::config::{default_config_path, load_config_or_default};
//!
//! let path = default_config_path().unwrap();
//! let config = load_config_or_default(&path).unwrap();
//! println!("Crawl depth defaults to {}", config.crawl.depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlDefaults, HttpConfig, WikiConfig, MASKED_PASSWORD};

// Re-export parser functions
pub use parser::{default_config_path, load_config, load_config_or_default, save_config};
pub use validation::{validate, validate_api_url};
