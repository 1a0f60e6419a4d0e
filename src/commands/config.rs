use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use std::path::Path;

use crate::config::{load_config_or_default, save_config, validate_api_url, Config};

/// Arguments of the `config` command
#[derive(Debug, Clone, Default)]
pub struct ConfigParams {
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub interactive: bool,
}

impl ConfigParams {
    fn has_updates(&self) -> bool {
        self.api_url.is_some() || self.username.is_some() || self.password.is_some()
    }
}

/// Shows or updates the configuration file at `path`
///
/// Without flags the current configuration is printed with the password
/// masked. Flags are merged into the file; `interactive` prompts for each
/// value with the current one as default.
pub fn configure(path: &Path, params: ConfigParams) -> Result<()> {
    let mut config = load_config_or_default(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if !params.interactive && !params.has_updates() {
        println!("Configuration file: {}", path.display());
        println!("{}", render_masked(&config)?);
        return Ok(());
    }

    let params = if params.interactive {
        prompt(&config)?
    } else {
        params
    };

    if let Some(url) = params.api_url.as_deref().filter(|u| !u.is_empty()) {
        validate_api_url(url)?;
    }

    config.merge_wiki(params.api_url, params.username, params.password);
    save_config(&config, path).with_context(|| format!("Failed to save {}", path.display()))?;

    tracing::info!("Configuration saved to {}", path.display());
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// TOML rendering of `config` with the password replaced
pub fn render_masked(config: &Config) -> Result<String> {
    toml::to_string_pretty(&config.masked()).context("Failed to render configuration")
}

fn prompt(current: &Config) -> Result<ConfigParams> {
    let api_url: String = Input::new()
        .with_prompt("MediaWiki API URL")
        .with_initial_text(current.wiki.api_url.clone().unwrap_or_default())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            validate_api_url(input).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let username: String = Input::new()
        .with_prompt("Username")
        .with_initial_text(current.wiki.username.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let password = Password::new()
        .with_prompt("Password (leave empty to keep current)")
        .allow_empty_password(true)
        .interact()?;

    Ok(ConfigParams {
        api_url: Some(api_url),
        username: Some(username),
        password: Some(password),
        interactive: true,
    })
}
