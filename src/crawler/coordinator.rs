//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop. Starting from one page it:
//! - Pulls the next entry from the frontier in strategy order
//! - Fetches the page and hands its content to the sink
//! - Expands links of pages below the depth ceiling
//! - Stops when the frontier is empty or the page budget is spent

use crate::crawler::scheduler::{Frontier, FrontierEntry, Strategy};
use crate::crawler::source::LinkGraphSource;
use crate::output::{CrawlStats, PageSink};
use crate::{ApiError, CrawlError, WikiError};
use std::collections::HashSet;
use std::time::Instant;

/// Progress is logged every this many processed pages
const PROGRESS_INTERVAL: u32 = 10;

/// Walks the link graph of a wiki
///
/// A `Crawler` owns its source and sink and can run any number of crawls;
/// the visited set and frontier live only for the duration of one
/// [`Crawler::crawl`] call.
pub struct Crawler<S, K> {
    source: S,
    sink: K,
    strategy: Strategy,
}

impl<S, K> Crawler<S, K>
where
    S: LinkGraphSource,
    K: PageSink,
{
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `source` - Where page content and links come from
    /// * `sink` - Where processed pages are sent
    /// * `strategy` - Order in which the frontier is consumed
    pub fn new(source: S, sink: K, strategy: Strategy) -> Self {
        Self {
            source,
            sink,
            strategy,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Consumes the crawler, returning its source and sink
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Crawls the wiki starting from `start_page`
    ///
    /// Pages at `max_depth` are fetched and emitted but their links are not
    /// followed. At most `limit` pages are emitted. A title is enqueued at
    /// most once, at the depth it was first discovered at.
    ///
    /// # Errors
    ///
    /// * `WikiError::Crawl` - `start_page` is empty or `limit` is zero
    /// * `WikiError::Api` - fetching a page's content failed
    /// * `WikiError::Sink` - the sink rejected a page
    ///
    /// Missing pages and failed link lookups are logged and counted in the
    /// returned stats instead.
    pub async fn crawl(
        &mut self,
        start_page: &str,
        max_depth: u32,
        limit: u32,
    ) -> Result<CrawlStats, WikiError> {
        validate_arguments(start_page, limit)?;

        tracing::info!(
            "Starting crawl from '{}' with {} strategy, max depth {}, limit {} pages",
            start_page,
            self.strategy,
            max_depth,
            limit
        );

        let start_time = Instant::now();
        let mut visited: HashSet<String> = HashSet::from([start_page.to_string()]);
        let mut frontier = Frontier::seeded(start_page);
        let mut stats = CrawlStats::default();

        while stats.pages_processed < limit {
            let Some(FrontierEntry { title, depth }) = self.strategy.get_next(&mut frontier)
            else {
                tracing::debug!("Frontier is empty");
                break;
            };

            tracing::debug!("Processing [depth {}]: {}", depth, title);

            let Some(content) = self.source.fetch_page(&title).await? else {
                tracing::warn!("Page '{}' does not exist, skipping", title);
                stats.pages_missing += 1;
                continue;
            };

            stats.pages_processed += 1;
            self.sink.emit(&title, &content)?;

            if depth < max_depth {
                match self
                    .expand(&title, depth, &mut visited, &mut frontier)
                    .await
                {
                    Ok(added) => {
                        tracing::debug!("Queued {} new pages linked from '{}'", added, title)
                    }
                    Err(e) => {
                        tracing::error!("Error getting links from '{}': {}", title, e);
                        stats.link_failures += 1;
                    }
                }
            }

            if stats.pages_processed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} pages processed, {} in frontier, {} discovered",
                    stats.pages_processed,
                    frontier.len(),
                    visited.len()
                );
            }
        }

        stats.pages_discovered = u32::try_from(visited.len()).unwrap_or(u32::MAX);

        tracing::info!(
            "Crawl finished: {} processed, {} discovered in {:?}",
            stats.pages_processed,
            stats.pages_discovered,
            start_time.elapsed()
        );

        Ok(stats)
    }

    /// Enqueues every not-yet-visited link of `title` at `depth + 1`
    ///
    /// Returns the number of newly enqueued pages. On error nothing is
    /// enqueued.
    async fn expand(
        &self,
        title: &str,
        depth: u32,
        visited: &mut HashSet<String>,
        frontier: &mut Frontier,
    ) -> Result<usize, ApiError> {
        let links = self.source.fetch_outbound_links(title).await?;

        let mut added = 0;
        for link in links {
            if visited.contains(&link) {
                continue;
            }
            visited.insert(link.clone());
            self.strategy.add_page(frontier, link, depth + 1);
            added += 1;
        }

        Ok(added)
    }
}

/// Rejects arguments a crawl cannot start with
fn validate_arguments(start_page: &str, limit: u32) -> Result<(), CrawlError> {
    if start_page.trim().is_empty() {
        return Err(CrawlError::InvalidArgument(
            "start page cannot be empty".to_string(),
        ));
    }

    if limit < 1 {
        return Err(CrawlError::InvalidArgument(format!(
            "limit must be >= 1, got {}",
            limit
        )));
    }

    Ok(())
}
