//! Frontier and traversal strategies
//!
//! The frontier holds pages that have been discovered but not yet processed.
//! Pages are always appended at the tail; the strategy only decides which end
//! the next page is read from:
//!
//! | Strategy | get_next | add_page |
//! |----------|----------|----------|
//! | BreadthFirst | oldest entry (FIFO) | append at tail |
//! | DepthFirst | newest entry (LIFO) | append at tail |

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// A page waiting in the frontier together with its link distance from the start page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Page title as returned by the wiki
    pub title: String,

    /// Number of link hops from the start page along the path it was first found by
    pub depth: u32,
}

/// Pending pages of a single crawl
///
/// Only a [`Strategy`] can insert or remove entries, so insertion order is
/// always tail-append and the removal end is decided in one place.
#[derive(Debug, Default)]
pub struct Frontier {
    entries: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the start page at depth 0
    pub fn seeded(start_page: &str) -> Self {
        let mut frontier = Self::new();
        frontier.entries.push_back(FrontierEntry {
            title: start_page.to_string(),
            depth: 0,
        });
        frontier
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is left to process
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Traversal order of a crawl
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Strategy {
    /// Process every page at one depth before moving to the next depth
    #[default]
    #[serde(rename = "bfs")]
    #[value(name = "bfs")]
    BreadthFirst,

    /// Follow links as deep as possible before backtracking
    #[serde(rename = "dfs")]
    #[value(name = "dfs")]
    DepthFirst,
}

impl Strategy {
    /// Removes the next entry to process
    ///
    /// Returns `None` when the frontier is empty.
    pub fn get_next(self, frontier: &mut Frontier) -> Option<FrontierEntry> {
        match self {
            Self::BreadthFirst => frontier.entries.pop_front(),
            Self::DepthFirst => frontier.entries.pop_back(),
        }
    }

    /// Appends a newly discovered page at the tail of the frontier
    pub fn add_page(self, frontier: &mut Frontier, title: String, depth: u32) {
        frontier.entries.push_back(FrontierEntry { title, depth });
    }

    /// Short name used on the command line and in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth-first" => Ok(Self::DepthFirst),
            other => Err(format!("unknown strategy '{}', expected bfs or dfs", other)),
        }
    }
}
