//! Testing utilities for modbrowse
//!
//! Shared catalog fixtures and a recording [`SelectionSink`].
//!
//! Only available when compiled with `cfg(test)`.

use crate::browse::{HistoryAction, SelectionSink, favorite_key};
use crate::catalog::{AllowedTagSet, Catalog, CatalogEntry, Item, Publisher};
use crate::favorites::{FavoriteKey, FavoriteScoreTable};

/// Sink that remembers every notification it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub instantiated: Vec<FavoriteKey>,
    pub history: Vec<HistoryAction>,
    pub saved: Vec<FavoriteScoreTable>,
}

impl SelectionSink for RecordingSink {
    fn instantiate(&mut self, entry: CatalogEntry<'_>) {
        self.instantiated.push(favorite_key(&entry));
    }

    fn push_history(&mut self, action: HistoryAction) {
        self.history.push(action);
    }

    fn favorites_changed(&mut self, table: &FavoriteScoreTable) {
        self.saved.push(table.clone());
    }
}

/// Build a catalog from `(brand, item name, item slug, tags)` rows
///
/// Publisher slug is the lower-cased brand; name and brand are identical.
///
/// # Panics
/// Panics if two rows share a publisher and item slug.
pub fn catalog_from_rows(allowed: &[&str], rows: &[(&str, &str, &str, &[&str])]) -> Catalog {
    let mut catalog = Catalog::new(AllowedTagSet::new(allowed.iter().copied()));
    for (brand, name, slug, tags) in rows {
        let publisher_slug = brand.to_lowercase();
        let publisher = match catalog.publishers().iter().position(|p| p.slug == publisher_slug) {
            Some(idx) => crate::catalog::PublisherId(idx),
            None => catalog
                .add_publisher(Publisher {
                    slug: publisher_slug,
                    name: (*brand).to_string(),
                    brand: (*brand).to_string(),
                })
                .expect("Duplicate publisher in test fixture"),
        };
        catalog
            .add_item(Item {
                publisher,
                slug: (*slug).to_string(),
                name: (*name).to_string(),
                description: String::new(),
                tags: tags.iter().map(|t| (*t).to_string()).collect(),
            })
            .expect("Duplicate item in test fixture");
    }
    catalog
}

/// Acme Filter, Acme VCO and Beta Filter2 with tags `filter` / `oscillator`
#[must_use]
pub fn acme_beta_catalog() -> Catalog {
    catalog_from_rows(
        &["filter", "oscillator"],
        &[
            ("Acme", "Filter", "acme-filter", &["filter"]),
            ("Acme", "VCO", "acme-vco", &["oscillator"]),
            ("Beta", "Filter2", "beta-filter2", &["filter"]),
        ],
    )
}
