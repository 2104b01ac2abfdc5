//! pixsearch - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// pixsearch - search and browse Pexels photos from the terminal
#[derive(Parser, Debug)]
#[command(name = "pixsearch")]
#[command(version)]
#[command(about = "TUI application for searching and browsing Pexels photos")]
pub struct Args {
    /// Run this search immediately on startup
    #[arg(short, long)]
    pub search: Option<String>,

    /// Photos requested per page (1-80)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=80))]
    pub per_page: Option<u32>,

    /// Quiet period in milliseconds before a typed search is sent
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API key to use for this session instead of the stored one
    #[arg(long)]
    pub api_key: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pixsearch::config::load_config_with_precedence(args.config.clone())?;
        let merged = pixsearch::config::merge_config(config_file);
        let with_env = pixsearch::config::apply_env_overrides(merged);
        pixsearch::config::apply_cli_overrides(with_env, args.per_page, args.debounce_ms)
    };
    config.validate()?;

    // Guard flushes buffered log lines on drop
    let _log_guard = pixsearch::logging::init(&config.log_file_path)?;

    info!(
        api_base_url = %config.api_base_url,
        items_per_page = config.items_per_page,
        debounce_ms = config.debounce_ms,
        "Configuration loaded and resolved"
    );

    let options = pixsearch::view::LaunchOptions {
        initial_search: args.search,
        api_key: args.api_key,
    };

    pixsearch::view::run_with_config(&config, options)?;

    Ok(())
}
