//! Crawler module for walking a wiki's link graph
//!
//! This module contains the core crawling logic, including:
//! - The frontier and the breadth-first / depth-first strategies
//! - The `LinkGraphSource` abstraction over the remote wiki
//! - The crawl loop enforcing the visited set, depth ceiling and page limit

mod coordinator;
mod scheduler;
mod source;

pub use coordinator::Crawler;
pub use scheduler::{Frontier, FrontierEntry, Strategy};
pub use source::LinkGraphSource;

pub use crate::output::CrawlStats;
