//! Catalog file loading
//!
//! Reads a catalog description (TOML or JSON, picked by file extension) and
//! builds a [`Catalog`]. Tags are matched against the allowed tag set ignoring
//! case and stored in their canonical spelling; unknown tags are dropped.
//!
//! ```toml
//! allowed_tags = ["Filter", "Oscillator"]
//!
//! [[publishers]]
//! slug = "acme"
//! name = "Acme Modules"
//! brand = "Acme"
//!
//! [[publishers.items]]
//! slug = "acme-vco"
//! name = "VCO"
//! tags = ["oscillator"]
//! ```

use super::{AllowedTagSet, Catalog, CatalogError, Item, Publisher};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// On-disk catalog description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Overrides the default tag set when present
    #[serde(default)]
    pub allowed_tags: Option<Vec<String>>,

    #[serde(default)]
    pub publishers: Vec<PublisherFile>,
}

/// On-disk publisher record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublisherFile {
    pub slug: String,
    pub name: String,

    /// Defaults to `name` when absent
    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub items: Vec<ItemFile>,
}

/// On-disk item record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemFile {
    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Supported catalog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// Pick a format from a path's extension
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnsupportedFormat` for anything but `.toml` or `.json`.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Load a catalog from a file on disk
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or parsed, or if slugs
/// are blank or duplicated.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents, format)?;

    info!(
        path = %path.display(),
        publishers = catalog.publishers().len(),
        items = catalog.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Parse catalog text in the given format
///
/// # Errors
///
/// Returns `CatalogError` on parse failure or slug violations.
pub fn parse_catalog(contents: &str, format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = match format {
        CatalogFormat::Toml => toml::from_str(contents)?,
        CatalogFormat::Json => serde_json::from_str(contents)?,
    };
    file.try_into()
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        let allowed = file
            .allowed_tags
            .map_or_else(AllowedTagSet::default, AllowedTagSet::new);
        let mut catalog = Self::new(allowed);

        for publisher in file.publishers {
            let brand = publisher.brand.unwrap_or_else(|| publisher.name.clone());
            let publisher_id = catalog.add_publisher(Publisher {
                slug: publisher.slug,
                name: publisher.name,
                brand,
            })?;

            for item in publisher.items {
                catalog.add_item(Item {
                    publisher: publisher_id,
                    slug: item.slug,
                    name: item.name,
                    description: item.description.unwrap_or_default(),
                    tags: item.tags,
                })?;
            }
        }

        debug!(
            brands = catalog.brands().len(),
            tags = catalog.allowed_tags().len(),
            "Catalog assembled"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_CATALOG: &str = r#"
allowed_tags = ["Filter", "Oscillator"]

[[publishers]]
slug = "acme"
name = "Acme Modules"
brand = "Acme"

[[publishers.items]]
slug = "acme-vco"
name = "VCO"
description = "Voltage-controlled oscillator"
tags = ["oscillator", "Oscillator", "Sequencer"]

[[publishers]]
slug = "beta"
name = "Beta"

[[publishers.items]]
slug = "beta-filter2"
name = "Filter2"
tags = ["FILTER"]
"#;

    #[test]
    fn test_parse_toml_catalog() {
        let catalog = parse_catalog(TOML_CATALOG, CatalogFormat::Toml).unwrap();

        assert_eq!(catalog.publishers().len(), 2);
        assert_eq!(catalog.len(), 2);

        let vco = catalog.find("acme", "acme-vco").unwrap();
        assert_eq!(vco.publisher.brand, "Acme");
        assert_eq!(vco.item.description, "Voltage-controlled oscillator");
        // Case-folded, de-duplicated, unknown "Sequencer" dropped
        assert_eq!(vco.item.tags, vec!["Oscillator"]);

        let filter = catalog.find("beta", "beta-filter2").unwrap();
        // Brand defaults to publisher name
        assert_eq!(filter.publisher.brand, "Beta");
        assert_eq!(filter.item.tags, vec!["Filter"]);
    }

    #[test]
    fn test_parse_json_catalog_uses_default_tags() {
        let json = r#"{
            "publishers": [
                {"slug": "acme", "name": "Acme", "items": [
                    {"slug": "lfo", "name": "LFO", "tags": ["lfo", "Utility"]}
                ]}
            ]
        }"#;

        let catalog = parse_catalog(json, CatalogFormat::Json).unwrap();
        let lfo = catalog.find("acme", "lfo").unwrap();
        assert_eq!(lfo.item.tags, vec!["LFO", "Utility"]);
        assert_eq!(catalog.allowed_tags(), &AllowedTagSet::default());
    }

    #[test]
    fn test_duplicate_publisher_rejected() {
        let json = r#"{"publishers": [
            {"slug": "acme", "name": "Acme"},
            {"slug": "acme", "name": "Acme Again"}
        ]}"#;

        let err = parse_catalog(json, CatalogFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePublisher(slug) if slug == "acme"));
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let json = r#"{"publishers": [
            {"slug": "acme", "name": "Acme", "items": [
                {"slug": "vco", "name": "VCO"},
                {"slug": "vco", "name": "VCO 2"}
            ]}
        ]}"#;

        let err = parse_catalog(json, CatalogFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateItem { .. }));
    }

    #[test]
    fn test_empty_slug_rejected() {
        let json = r#"{"publishers": [{"slug": " ", "name": "Nameless"}]}"#;
        let err = parse_catalog(json, CatalogFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySlug(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("plugins.TOML")).unwrap(),
            CatalogFormat::Toml
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("plugins.json")).unwrap(),
            CatalogFormat::Json
        );
        assert!(matches!(
            CatalogFormat::from_path(Path::new("plugins.yaml")),
            Err(CatalogError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
        assert!(CatalogFormat::from_path(Path::new("plugins")).is_err());
    }

    #[test]
    fn test_load_catalog_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(TOML_CATALOG.as_bytes()).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
