//! Page sink trait and error types
//!
//! A sink receives the content of every page a crawl processes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while emitting a page
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write page '{title}' to {path}: {source}")]
    Write {
        title: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for crawled page content
///
/// Errors are returned to the crawler, which aborts the crawl on the first
/// failed emit.
pub trait PageSink {
    /// Handles one page
    ///
    /// # Arguments
    ///
    /// * `title` - Title of the page
    /// * `content` - Full page content as returned by the wiki
    fn emit(&mut self, title: &str, content: &str) -> SinkResult<()>;
}

impl<T: PageSink + ?Sized> PageSink for Box<T> {
    fn emit(&mut self, title: &str, content: &str) -> SinkResult<()> {
        (**self).emit(title, content)
    }
}

impl<T: PageSink + ?Sized> PageSink for &mut T {
    fn emit(&mut self, title: &str, content: &str) -> SinkResult<()> {
        (**self).emit(title, content)
    }
}
