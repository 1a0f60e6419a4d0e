//! wikicli main entry point
//!
//! Command-line interface for reading, editing and crawling MediaWiki sites.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wikicli::commands::{self, ConfigParams, CrawlParams, GetParams, OutputFormat, PutParams};
use wikicli::config::{default_config_path, load_config_or_default, Config};
use wikicli::crawler::Strategy;

/// wikicli: a command-line client for MediaWiki
///
/// Fetch and edit pages through the MediaWiki API, convert between wikitext,
/// Markdown and HTML, and crawl the link graph from a starting page.
#[derive(Parser, Debug)]
#[command(name = "wikicli")]
#[command(version)]
#[command(about = "A command-line client for MediaWiki", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page and print or save its content
    Get {
        /// Title of the page
        title: String,

        /// Save to a file in this format instead of printing wikitext
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Print the page URL
        #[arg(long)]
        show_url: bool,

        /// Directory for saved files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Create or replace a page
    Put {
        /// File with the new content (.wiki, .md, .html, .txt)
        file: Option<PathBuf>,

        /// Page name (default: file name with underscores as spaces)
        #[arg(short, long)]
        pagename: Option<String>,

        /// Content given directly instead of a file
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Edit summary
        #[arg(short = 'm', long, default_value = "")]
        summary: String,

        /// Mark as a minor edit
        #[arg(long)]
        minor: bool,

        /// Mark as a bot edit
        #[arg(long)]
        bot: bool,
    },

    /// Crawl the link graph from a starting page
    Crawl {
        /// Page to start from
        start_page: String,

        /// Maximum link depth (default from config)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Save pages to this directory instead of printing previews
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Traversal strategy (default from config)
        #[arg(short, long, value_enum)]
        strategy: Option<Strategy>,

        /// Maximum number of pages to process (default from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show or update the configuration
    Config {
        /// MediaWiki API URL, e.g. https://example.org/w/api.php
        #[arg(long)]
        api_url: Option<String>,

        /// Bot username
        #[arg(long)]
        username: Option<String>,

        /// Bot password
        #[arg(long)]
        password: Option<String>,

        /// Prompt for each value
        #[arg(short, long)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Command::Config {
            api_url,
            username,
            password,
            interactive,
        } => commands::configure(
            &config_path,
            ConfigParams {
                api_url,
                username,
                password,
                interactive,
            },
        ),
        Command::Get {
            title,
            output,
            show_url,
            dir,
        } => {
            let config = load(&config_path)?;
            commands::get(
                &config,
                GetParams {
                    title,
                    output,
                    show_url,
                    dir,
                },
            )
            .await
        }
        Command::Put {
            file,
            pagename,
            content,
            summary,
            minor,
            bot,
        } => {
            let config = load(&config_path)?;
            commands::put(
                &config,
                PutParams {
                    file,
                    pagename,
                    content,
                    summary,
                    minor,
                    bot,
                },
            )
            .await
        }
        Command::Crawl {
            start_page,
            depth,
            output,
            strategy,
            limit,
        } => {
            let config = load(&config_path)?;
            commands::crawl(
                &config,
                CrawlParams {
                    start_page,
                    depth,
                    output,
                    strategy,
                    limit,
                },
            )
            .await?;
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<Config> {
    tracing::debug!("Loading configuration from: {}", path.display());
    load_config_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikicli=info,warn"),
            1 => EnvFilter::new("wikicli=debug,info"),
            2 => EnvFilter::new("wikicli=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
