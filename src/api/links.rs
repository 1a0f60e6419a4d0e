//! Outbound link enumeration with continuation

use crate::api::client::MediaWikiClient;
use crate::api::responses::{PagesQuery, QueryResponse};
use crate::api::ApiError;

/// Links requested per batch (the API maximum for normal users)
const LINKS_PER_BATCH: &str = "500";

/// Upper bound on batches fetched for a single page
const MAX_LINK_BATCHES: usize = 1000;

/// Iterates the outbound links of one page batch by batch
///
/// Each call to [`LinkPager::next_batch`] issues one request; the pager stops
/// once the server omits the continuation token.
pub struct LinkPager<'a> {
    client: &'a MediaWikiClient,
    title: String,
    continuation: Option<String>,
    batches: usize,
    done: bool,
}

impl<'a> LinkPager<'a> {
    fn new(client: &'a MediaWikiClient, title: &str) -> Self {
        Self {
            client,
            title: title.to_string(),
            continuation: None,
            batches: 0,
            done: false,
        }
    }

    /// Fetches the next batch of link titles
    ///
    /// Returns `Ok(None)` when all batches have been returned.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<String>>, ApiError> {
        if self.done {
            return Ok(None);
        }
        if self.batches >= MAX_LINK_BATCHES {
            tracing::warn!(
                "Stopping link enumeration of '{}' after {} batches",
                self.title,
                self.batches
            );
            self.done = true;
            return Ok(None);
        }

        let mut params = vec![
            ("action", "query"),
            ("prop", "links"),
            ("titles", self.title.as_str()),
            ("pllimit", LINKS_PER_BATCH),
        ];
        if let Some(token) = self.continuation.as_deref() {
            params.push(("plcontinue", token));
        }

        let response: QueryResponse<PagesQuery> = self.client.get_json(&params).await?;
        self.batches += 1;

        if let Some(error) = response.error {
            return Err(ApiError::Remote {
                code: error.code,
                info: error.info,
            });
        }

        let query = response.query.ok_or_else(|| {
            ApiError::Malformed(format!("no 'query' in link response for '{}'", self.title))
        })?;

        let links: Vec<String> = query
            .pages
            .into_values()
            .filter(|page| page.exists())
            .flat_map(|page| page.links.into_iter().map(|link| link.title))
            .collect();

        self.continuation = response.continuation.and_then(|c| c.plcontinue);
        self.done = self.continuation.is_none();

        Ok(Some(links))
    }
}

impl MediaWikiClient {
    /// Returns a pager over the outbound links of `title`
    pub fn links(&self, title: &str) -> LinkPager<'_> {
        LinkPager::new(self, title)
    }

    /// Collects every outbound link of `title`, in server order
    pub async fn get_links(&self, title: &str) -> Result<Vec<String>, ApiError> {
        let mut pager = self.links(title);
        let mut all_links = Vec::new();

        while let Some(batch) = pager.next_batch().await? {
            all_links.extend(batch);
        }

        tracing::debug!(
            "Found {} links on '{}' in {} batches",
            all_links.len(),
            title,
            pager.batches
        );
        Ok(all_links)
    }
}
