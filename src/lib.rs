//! Modbrowse - a searchable, faceted module catalog browser
//!
//! This library filters a catalog of publishers and their items by fuzzy
//! search text, a brand facet and a tag facet, orders the result by a decaying
//! favorite score, and reports which facet values would still yield results.
//! Favorite scores persist in an embedded sled database.

use thiserror::Error;

pub mod browse;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod output;
pub mod search;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ModbrowseError {
    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Favorite store error
    #[error("Favorite store error: {0}")]
    StoreError(#[from] favorites::StoreError),
    /// Browse session error
    #[error("Browse error: {0}")]
    BrowseError(#[from] browse::BrowseError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
