//! Modbrowse CLI application entry point
//!
//! Browses a module catalog from the command line: filter by fuzzy search
//! text, brand and tag, see which facet values still yield results, and
//! record selections that raise an item's favorite score.
//!
//! # Usage
//!
//! ```bash
//! # Print the whole catalog (default command)
//! modbrowse --catalog plugins.toml
//!
//! # Filter by search text, brand and tag
//! modbrowse browse -s vco -b Acme -t Oscillator
//!
//! # Record a selection
//! modbrowse select acme acme-vco
//!
//! # Interactive session on stdin
//! modbrowse shell
//!
//! # Logging
//! RUST_LOG=modbrowse=debug modbrowse browse
//! modbrowse -vv browse
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/modbrowse/config.toml` on Linux). Command-line flags take
//! precedence over configuration values.

use modbrowse::{
    ModbrowseError,
    browse::SortMode,
    catalog::{Catalog, load_catalog},
    cli::{Cli, Commands},
    commands,
    config::BrowserConfig,
    favorites::{FavoriteStore, SledFavoriteStore},
};
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, ModbrowseError>;

fn init_logging(cli: &Cli) {
    let filter = if cli.verbose > 0 {
        EnvFilter::new(format!("modbrowse={}", cli.log_directive()))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_directive()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load the catalog named on the command line or in the config file
fn load_configured_catalog(cli: &Cli, config: &BrowserConfig) -> Result<Catalog> {
    let path = cli.catalog.as_ref().or(config.catalog.as_ref()).ok_or_else(|| {
        ModbrowseError::InvalidInput(
            "No catalog configured. Pass --catalog <PATH> or set `catalog` in the config file.".into(),
        )
    })?;
    Ok(load_catalog(path)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let config = BrowserConfig::load()?;
    debug!(?config, "Loaded configuration");

    let quiet = cli.quiet || config.quiet;
    let sort_mode = cli.sort.map_or(config.sort_mode, SortMode::from);
    if config.no_color {
        colored::control::set_override(false);
    }

    let favorites_path = match &cli.favorites {
        Some(path) => path.clone(),
        None => config.favorites_path()?,
    };
    let store = SledFavoriteStore::open(&favorites_path)?;

    let mut stdout = io::stdout().lock();
    match cli.get_command() {
        Commands::Browse { filters, limit } => {
            let catalog = load_configured_catalog(&cli, &config)?;
            let favorites = store.load()?;
            commands::browse(&catalog, favorites, &filters, limit, sort_mode, quiet, &mut stdout)?;
        }
        Commands::Select { publisher, item } => {
            let catalog = load_configured_catalog(&cli, &config)?;
            commands::select(&catalog, &store, &publisher, &item, quiet, &mut stdout)?;
        }
        Commands::Favorites { clear } => {
            commands::favorites(&store, clear, quiet, &mut stdout)?;
        }
        Commands::Shell => {
            let catalog = load_configured_catalog(&cli, &config)?;
            commands::shell(&catalog, &store, sort_mode, quiet, io::stdin().lock(), &mut stdout)?;
        }
    }

    Ok(())
}
