//! MediaWiki action API client
//!
//! This module talks to `api.php`:
//! - Login with a bot password (session kept in cookies)
//! - Fetching page wikitext and detecting missing pages
//! - Editing pages with a CSRF token
//! - Enumerating outbound links across continuation batches
//! - Building page URLs for display

mod auth;
mod client;
mod links;
mod pages;
mod responses;

pub use client::{build_http_client, Credentials, MediaWikiClient};
pub use links::LinkPager;
pub use pages::EditOptions;

use thiserror::Error;

/// Errors raised while talking to the wiki
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed API response: {0}")]
    Malformed(String),

    #[error("API error {code}: {info}")]
    Remote { code: String, info: String },

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Edit failed: {0}")]
    EditRejected(String),

    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
