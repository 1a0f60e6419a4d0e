use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::api::{EditOptions, MediaWikiClient};
use crate::commands::hint_on_missing_converter;
use crate::config::Config;
use crate::convert::{ContentFormat, ConverterRegistry};

/// Arguments of the `put` command
#[derive(Debug, Clone, Default)]
pub struct PutParams {
    pub file: Option<PathBuf>,
    pub pagename: Option<String>,
    pub content: Option<String>,
    pub summary: String,
    pub minor: bool,
    pub bot: bool,
}

/// Page name and wikitext ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub title: String,
    pub wikitext: String,
}

pub async fn put(config: &Config, params: PutParams) -> Result<()> {
    config.require_api_url()?;
    config.require_credentials()?;

    let registry = ConverterRegistry::with_defaults();
    let upload = prepare_upload(&registry, &params)?;

    let client = MediaWikiClient::from_config(config)?;
    let options = EditOptions {
        summary: params.summary.clone(),
        minor: params.minor,
        bot: params.bot,
    };

    client
        .edit_page(&upload.title, &upload.wikitext, &options)
        .await
        .with_context(|| format!("Failed to update page '{}'", upload.title))?;

    println!("Successfully updated page '{}'.", upload.title);
    match client.page_url(&upload.title) {
        Ok(url) => println!("URL: {}", url),
        Err(e) => tracing::debug!("Could not build page URL: {}", e),
    }

    Ok(())
}

/// Resolves the page name and content from a file or `--content`
///
/// File content is converted to MediaWiki markup when its extension names
/// another markup format. An explicit `--pagename` wins over the name derived
/// from the file.
pub fn prepare_upload(registry: &ConverterRegistry, params: &PutParams) -> Result<Upload> {
    let (wikitext, derived_title) = match (&params.file, &params.content) {
        (Some(file), _) => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let format = ContentFormat::from_filename(file);
            let wikitext = if format.is_uploadable_as_is() {
                raw
            } else {
                registry
                    .convert(&raw, format, ContentFormat::MediaWiki)
                    .inspect_err(hint_on_missing_converter)
                    .with_context(|| format!("Failed to convert {}", file.display()))?
            };

            (wikitext, page_name_from_path(file))
        }
        (None, Some(content)) => (content.clone(), None),
        (None, None) => bail!("Provide content via --content or specify a file path"),
    };

    let Some(title) = params.pagename.clone().or(derived_title) else {
        bail!("Page name must be provided either via --pagename or in the filename");
    };

    Ok(Upload { title, wikitext })
}

/// Page name for a file: its stem with underscores turned into spaces
pub fn page_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.replace('_', " "))
}
