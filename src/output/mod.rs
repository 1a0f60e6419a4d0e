//! Output module for crawled pages and crawl reports
//!
//! This module handles:
//! - The `PageSink` trait the crawler hands page content to
//! - A console sink printing a preview of each page
//! - A file sink saving each page under an output directory
//! - Crawl statistics and the final report

mod console;
mod file;
pub mod stats;
mod traits;

pub use console::{preview, ConsoleSink, PREVIEW_CHARS};
pub use file::{safe_file_stem, FileSink};
pub use stats::{format_crawl_report, print_crawl_report, CrawlStats};
pub use traits::{PageSink, SinkError, SinkResult};
