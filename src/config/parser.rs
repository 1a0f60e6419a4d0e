use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Directory name under the user configuration directory
const APP_DIR: &str = "wikicli";

/// File name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the default configuration path, `<config_dir>/wikicli/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wikicli::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Default crawl limit: {}", config.crawl.limit);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Loads the configuration, falling back to defaults when the file does not exist
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(
            "No configuration at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }
    load_config(path)
}

/// Validates and writes the configuration as TOML
///
/// The parent directory is created if needed. On Unix the file is restricted
/// to the owner because it may contain a password.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    validate(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    tracing::debug!("Configuration written to {}", path.display());
    Ok(())
}
