pub mod config;
pub mod crawl;
pub mod get;
pub mod put;

// Re-export command functions for convenience
pub use config::{configure, ConfigParams};
pub use crawl::{crawl, CrawlParams};
pub use get::{get, GetParams, OutputFormat};
pub use put::{put, PutParams};

use crate::convert::ConvertError;

/// Printed when a conversion needs pandoc and it is not installed
pub(crate) const PANDOC_HINT: &str =
    "Format conversion requires pandoc. Install it from https://pandoc.org/installing.html";

/// Prints the pandoc install hint if `error` was caused by a missing converter
pub(crate) fn hint_on_missing_converter(error: &ConvertError) {
    if matches!(error, ConvertError::ConverterMissing { .. }) {
        eprintln!("{}", PANDOC_HINT);
    }
}
