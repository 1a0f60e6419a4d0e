//! Console sink: prints a header and a preview of each page

use crate::output::traits::{PageSink, SinkResult};
use std::io::{self, Stdout, Write};

/// Number of characters of content shown per page
pub const PREVIEW_CHARS: usize = 500;

/// Writes `=== Page: <title> ===` followed by a truncated preview
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    /// Creates a sink writing to standard output
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a sink writing to any writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the sink and returns the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Truncates content to [`PREVIEW_CHARS`] characters, appending `...` if anything was cut
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

impl<W: Write> PageSink for ConsoleSink<W> {
    fn emit(&mut self, title: &str, content: &str) -> SinkResult<()> {
        writeln!(self.out, "\n=== Page: {} ===", title)?;
        writeln!(self.out, "{}", preview(content))?;
        self.out.flush()?;
        Ok(())
    }
}
