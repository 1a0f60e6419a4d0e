//! Integration tests against a mock MediaWiki API
//!
//! These tests use wiremock to stand in for `api.php` and drive the client
//! and the crawl engine end-to-end.

mod api_tests;
mod common;
mod crawl_tests;
