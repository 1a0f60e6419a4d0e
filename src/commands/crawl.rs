use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::api::MediaWikiClient;
use crate::config::{Config, CrawlDefaults};
use crate::crawler::{CrawlStats, Crawler, LinkGraphSource, Strategy};
use crate::output::{print_crawl_report, ConsoleSink, FileSink, PageSink};

/// Arguments of the `crawl` command; unset values come from `[crawl]`
#[derive(Debug, Clone, Default)]
pub struct CrawlParams {
    pub start_page: String,
    pub depth: Option<u32>,
    pub output: Option<PathBuf>,
    pub strategy: Option<Strategy>,
    pub limit: Option<u32>,
}

/// Effective crawl settings after applying defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    pub depth: u32,
    pub limit: u32,
    pub strategy: Strategy,
}

impl CrawlParams {
    pub fn resolve(&self, defaults: &CrawlDefaults) -> CrawlSettings {
        CrawlSettings {
            depth: self.depth.unwrap_or(defaults.depth),
            limit: self.limit.unwrap_or(defaults.limit),
            strategy: self.strategy.unwrap_or(defaults.strategy),
        }
    }
}

pub async fn crawl(config: &Config, params: CrawlParams) -> Result<CrawlStats> {
    let client = MediaWikiClient::from_config(config)?;
    let settings = params.resolve(&config.crawl);

    let sink: Box<dyn PageSink> = match &params.output {
        Some(dir) => Box::new(
            FileSink::new(dir)
                .with_context(|| format!("Failed to prepare output directory {}", dir.display()))?,
        ),
        None => Box::new(ConsoleSink::stdout()),
    };

    println!(
        "Starting {} crawl from '{}' (max depth: {}, limit: {} pages)",
        settings.strategy, params.start_page, settings.depth, settings.limit
    );
    if let Some(dir) = &params.output {
        println!("Saving pages to {}", dir.display());
    }

    run_crawl(client, sink, &params.start_page, settings).await
}

/// Runs a crawl and prints the final report
pub async fn run_crawl<S, K>(
    source: S,
    sink: K,
    start_page: &str,
    settings: CrawlSettings,
) -> Result<CrawlStats>
where
    S: LinkGraphSource,
    K: PageSink,
{
    let mut crawler = Crawler::new(source, sink, settings.strategy);
    let stats = crawler
        .crawl(start_page, settings.depth, settings.limit)
        .await
        .with_context(|| format!("Crawl from '{}' failed", start_page))?;

    print_crawl_report(&stats, settings.depth, settings.limit);
    Ok(stats)
}
