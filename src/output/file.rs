//! File sink: saves the full content of each page under an output directory

use crate::output::traits::{PageSink, SinkError, SinkResult};
use std::path::{Path, PathBuf};

/// Extension of files written by [`FileSink`]
const PAGE_EXTENSION: &str = "txt";

/// Turns a page title into a file stem
///
/// Spaces and path separators become underscores so a title like
/// `Help:Foo/Bar baz` cannot escape the output directory.
pub fn safe_file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// Writes each page to `<dir>/<safe title>.txt`
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Creates the sink, creating the output directory if it does not exist
    pub fn new(dir: impl Into<PathBuf>) -> SinkResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a page with the given title is written to
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", safe_file_stem(title), PAGE_EXTENSION))
    }
}

impl PageSink for FileSink {
    fn emit(&mut self, title: &str, content: &str) -> SinkResult<()> {
        let path = self.path_for(title);
        std::fs::write(&path, content).map_err(|source| SinkError::Write {
            title: title.to_string(),
            path: path.clone(),
            source,
        })?;
        tracing::info!("Saved '{}' to {}", title, path.display());
        Ok(())
    }
}
