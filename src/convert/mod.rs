//! Content format conversion
//!
//! Pages are stored as MediaWiki markup. Markdown and HTML files are converted
//! before upload, and fetched pages can be saved as Markdown or HTML. The
//! conversion itself is delegated to the external `pandoc` binary.

mod pandoc;

pub use pandoc::PandocConverter;

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised while converting content
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No converter from {from} to {to}")]
    Unsupported {
        from: ContentFormat,
        to: ContentFormat,
    },

    #[error("Converter '{program}' is not installed or not on PATH")]
    ConverterMissing { program: String },

    #[error("Conversion from {from} to {to} failed: {message}")]
    Failed {
        from: ContentFormat,
        to: ContentFormat,
        message: String,
    },

    #[error("IO error during conversion: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for conversion operations
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Markup formats known to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFormat {
    Markdown,
    MediaWiki,
    Html,
    Text,
    Unknown,
}

impl ContentFormat {
    /// Infers the format from a file extension (case-insensitive)
    pub fn from_filename(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            Some("wiki" | "mediawiki") => Self::MediaWiki,
            Some("html" | "htm") => Self::Html,
            Some("txt") => Self::Text,
            _ => Self::Unknown,
        }
    }

    /// Format name understood by `pandoc -f/-t`
    pub fn pandoc_name(self) -> Option<&'static str> {
        match self {
            Self::Markdown => Some("markdown"),
            Self::MediaWiki => Some("mediawiki"),
            Self::Html => Some("html"),
            Self::Text | Self::Unknown => None,
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::MediaWiki => "wiki",
            Self::Html => "html",
            Self::Text => "txt",
            Self::Unknown => "txt",
        }
    }

    /// True if content in this format can be uploaded without conversion
    pub fn is_uploadable_as_is(self) -> bool {
        matches!(self, Self::MediaWiki | Self::Text | Self::Unknown)
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markdown => "markdown",
            Self::MediaWiki => "mediawiki",
            Self::Html => "html",
            Self::Text => "text",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A conversion backend
pub trait Converter {
    /// True if this converter handles `from` -> `to`
    fn can_convert(&self, from: ContentFormat, to: ContentFormat) -> bool;

    /// Converts `content`
    fn convert(&self, content: &str, from: ContentFormat, to: ContentFormat)
        -> ConvertResult<String>;
}

/// Returns content unchanged when source and target formats match
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl Converter for IdentityConverter {
    fn can_convert(&self, from: ContentFormat, to: ContentFormat) -> bool {
        from == to
    }

    fn convert(
        &self,
        content: &str,
        from: ContentFormat,
        to: ContentFormat,
    ) -> ConvertResult<String> {
        if from != to {
            return Err(ConvertError::Unsupported { from, to });
        }
        Ok(content.to_string())
    }
}

/// Ordered list of converters; the first one able to handle a pair wins
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter + Send + Sync>>,
}

impl ConverterRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Registry with the pandoc converter
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PandocConverter::new());
        registry
    }

    pub fn register(&mut self, converter: impl Converter + Send + Sync + 'static) {
        self.converters.push(Box::new(converter));
    }

    /// Converts `content`, passing it through unchanged when formats match
    ///
    /// # Errors
    ///
    /// `ConvertError::Unsupported` if no registered converter handles the pair,
    /// or whatever error the chosen converter returns.
    pub fn convert(
        &self,
        content: &str,
        from: ContentFormat,
        to: ContentFormat,
    ) -> ConvertResult<String> {
        if IdentityConverter.can_convert(from, to) {
            return IdentityConverter.convert(content, from, to);
        }

        let converter = self
            .converters
            .iter()
            .find(|c| c.can_convert(from, to))
            .ok_or(ConvertError::Unsupported { from, to })?;

        tracing::debug!("Converting {} bytes from {} to {}", content.len(), from, to);
        converter.convert(content, from, to)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
