use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::api::MediaWikiClient;
use crate::commands::hint_on_missing_converter;
use crate::config::Config;
use crate::convert::{ContentFormat, ConverterRegistry};
use crate::output::safe_file_stem;
use crate::WikiError;

/// File format of `get -o`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown (converted with pandoc)
    Md,
    /// Wikitext as stored
    Raw,
    /// HTML (converted with pandoc)
    Html,
}

impl OutputFormat {
    pub fn content_format(self) -> ContentFormat {
        match self {
            Self::Md => ContentFormat::Markdown,
            Self::Raw => ContentFormat::MediaWiki,
            Self::Html => ContentFormat::Html,
        }
    }
}

/// Arguments of the `get` command
#[derive(Debug, Clone)]
pub struct GetParams {
    pub title: String,
    pub output: Option<OutputFormat>,
    pub show_url: bool,
    pub dir: PathBuf,
}

pub async fn get(config: &Config, params: GetParams) -> Result<()> {
    let client = MediaWikiClient::from_config(config)?;

    if params.show_url {
        let url = client.page_url(&params.title)?;
        println!("URL: {}", url);
    }

    let content = client
        .get_page(&params.title)
        .await
        .with_context(|| format!("Failed to fetch page '{}'", params.title))?
        .ok_or_else(|| WikiError::PageNotFound {
            title: params.title.clone(),
        })?;

    match params.output {
        None => println!("{}", content),
        Some(format) => {
            let registry = ConverterRegistry::with_defaults();
            let path = save_page(&registry, &params.dir, &params.title, &content, format)?;
            println!("Saved content of '{}' to {}", params.title, path.display());
        }
    }

    Ok(())
}

/// Converts fetched wikitext and writes it to `<dir>/<safe title>.<ext>`
pub fn save_page(
    registry: &ConverterRegistry,
    dir: &Path,
    title: &str,
    wikitext: &str,
    format: OutputFormat,
) -> Result<PathBuf> {
    let target = format.content_format();
    let converted = registry
        .convert(wikitext, ContentFormat::MediaWiki, target)
        .inspect_err(hint_on_missing_converter)
        .with_context(|| format!("Failed to convert '{}' to {}", title, target))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let path = dir.join(format!("{}.{}", safe_file_stem(title), target.extension()));
    std::fs::write(&path, converted)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!("Saved '{}' as {}", title, path.display());
    Ok(path)
}
