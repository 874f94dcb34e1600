//! Catalog-specific error types
//!
//! These errors are raised while loading or assembling a catalog. Once a
//! catalog exists, every browse operation over it is total.
//!
//! # Error Types
//!
//! - **`Io`**: The catalog file could not be read
//! - **`Toml`** / **`Json`**: The catalog file could not be parsed
//! - **`UnsupportedFormat`**: The file extension is neither `.toml` nor `.json`
//! - **`DuplicatePublisher`** / **`DuplicateItem`**: Slug uniqueness violated
//! - **`EmptySlug`**: A publisher or item has a blank slug

use thiserror::Error;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML catalog could not be parsed
    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON catalog could not be parsed
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown file extension
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// Two publishers share a slug
    #[error("Duplicate publisher slug: {0}")]
    DuplicatePublisher(String),

    /// Two items of one publisher share a slug
    #[error("Duplicate item slug '{item}' in publisher '{publisher}'")]
    DuplicateItem { publisher: String, item: String },

    /// An item referenced a publisher index that does not exist
    #[error("Unknown publisher index: {0}")]
    UnknownPublisher(usize),

    /// Blank slug
    #[error("Empty slug in {0}")]
    EmptySlug(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
