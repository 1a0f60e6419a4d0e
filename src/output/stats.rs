//! Crawl statistics and the end-of-crawl report

use std::fmt::Write as _;

/// Aggregate counters returned by a finished crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages whose content was fetched and emitted
    pub pages_processed: u32,

    /// Distinct titles ever enqueued, including the start page, pages cut
    /// off by the limit and pages that turned out not to exist
    pub pages_discovered: u32,

    /// Pages skipped because the wiki reported them missing
    pub pages_missing: u32,

    /// Pages whose outbound links could not be retrieved
    pub link_failures: u32,
}

impl CrawlStats {
    /// True if the crawl ended because the page budget was used up
    pub fn reached_limit(&self, limit: u32) -> bool {
        self.pages_processed >= limit
    }
}

/// Formats the report printed after a crawl
pub fn format_crawl_report(stats: &CrawlStats, max_depth: u32, limit: u32) -> String {
    let mut report = String::new();

    if stats.reached_limit(limit) {
        let _ = writeln!(
            report,
            "\nCrawl stopped after reaching limit of {} pages",
            limit
        );
    } else {
        let _ = writeln!(
            report,
            "\nCrawl complete. No more pages to process within depth {}",
            max_depth
        );
    }

    let _ = writeln!(report, "Total pages processed: {}", stats.pages_processed);
    let _ = writeln!(report, "Total pages discovered: {}", stats.pages_discovered);

    if stats.pages_missing > 0 {
        let _ = writeln!(report, "Missing pages skipped: {}", stats.pages_missing);
    }
    if stats.link_failures > 0 {
        let _ = writeln!(
            report,
            "Pages with failed link lookups: {}",
            stats.link_failures
        );
    }

    report
}

/// Prints the crawl report to standard output
pub fn print_crawl_report(stats: &CrawlStats, max_depth: u32, limit: u32) {
    print!("{}", format_crawl_report(stats, max_depth, limit));
}
