//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for modbrowse using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Print the filtered, ordered catalog with its facets (default)
//! - **select**: Record a selection and persist favorite scores
//! - **favorites**: List stored favorite scores
//! - **shell**: Line-driven browse session on stdin
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use modbrowse::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["modbrowse", "browse", "-t", "Filter"]);
//! assert!(matches!(cli.get_command(), Commands::Browse { .. }));
//! ```

use crate::browse::SortMode;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sort mode as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    /// Favorite score, then publisher and item name
    Popularity,
    /// Best fuzzy match first while searching
    Relevance,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Popularity => Self::Popularity,
            SortArg::Relevance => Self::Relevance,
        }
    }
}

/// Filter arguments shared by the browse command
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Fuzzy search text
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Only show items of this brand
    #[arg(short = 'b', long = "brand", value_name = "BRAND")]
    pub brand: Option<String>,

    /// Only show items carrying this tag
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tag: Option<String>,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "modbrowse")]
#[command(about = "A searchable, faceted module catalog browser", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file to browse (overrides config)
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Favorite score database directory (overrides config)
    #[arg(long = "favorites", value_name = "PATH", global = true)]
    pub favorites: Option<PathBuf>,

    /// Item ordering (overrides config)
    #[arg(long = "sort", value_enum, global = true)]
    pub sort: Option<SortArg>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print visible items, facets and counters (default)
    #[command(visible_alias = "b")]
    Browse {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print at most this many items
        #[arg(short = 'n', long = "limit", value_name = "N")]
        limit: Option<usize>,
    },

    /// Record a selection of an item and persist favorite scores
    #[command(visible_alias = "s")]
    Select {
        /// Publisher slug
        #[arg(value_name = "PUBLISHER")]
        publisher: String,

        /// Item slug
        #[arg(value_name = "ITEM")]
        item: String,
    },

    /// List stored favorite scores, highest first
    #[command(visible_alias = "f")]
    Favorites {
        /// Remove every stored score
        #[arg(long = "clear")]
        clear: bool,
    },

    /// Interactive line-driven browse session
    #[command(visible_alias = "sh")]
    Shell,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            filters: FilterArgs::default(),
            limit: None,
        })
    }

    /// Log filter directive implied by `-v` flags
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
