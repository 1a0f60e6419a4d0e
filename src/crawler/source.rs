//! The link graph a crawl walks over

use crate::api::{ApiError, MediaWikiClient};
use std::future::Future;

/// Read access to a wiki's pages and outbound links
///
/// The crawler only depends on this trait, so tests can run it against an
/// in-memory graph and the binary runs it against [`MediaWikiClient`].
pub trait LinkGraphSource {
    /// Fetches the content of a page
    ///
    /// Returns `Ok(None)` if the page does not exist.
    fn fetch_page(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Option<String>, ApiError>> + Send;

    /// Fetches every outbound link title of a page, in server order
    ///
    /// Implementations follow server-side pagination until exhausted.
    fn fetch_outbound_links(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;
}

impl LinkGraphSource for MediaWikiClient {
    async fn fetch_page(&self, title: &str) -> Result<Option<String>, ApiError> {
        self.get_page(title).await
    }

    async fn fetch_outbound_links(&self, title: &str) -> Result<Vec<String>, ApiError> {
        self.get_links(title).await
    }
}
