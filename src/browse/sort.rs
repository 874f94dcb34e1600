//! Ordering of catalog entries
//!
//! Entries are ordered by favorite score (highest first), then publisher
//! name, then item name. The sort is stable, so entries equal on all three
//! keys keep their catalog order on every call.

use crate::catalog::CatalogEntry;
use crate::favorites::{FavoriteKey, FavoriteScoreTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How visible items are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Favorite score, publisher name, item name. Search relevance is ignored.
    #[default]
    Popularity,

    /// While searching, best fuzzy match first; popularity order breaks ties
    Relevance,
}

/// Favorite key of an entry
#[must_use]
pub fn favorite_key(entry: &CatalogEntry<'_>) -> FavoriteKey {
    FavoriteKey::new(entry.publisher.slug.as_str(), entry.item.slug.as_str())
}

/// Compare two entries given their favorite scores
#[must_use]
pub fn compare(a: &CatalogEntry<'_>, a_score: f64, b: &CatalogEntry<'_>, b_score: f64) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| a.publisher.name.cmp(&b.publisher.name))
        .then_with(|| a.item.name.cmp(&b.item.name))
}

/// Sort entries by popularity, then publisher name, then item name
#[must_use]
pub fn sort_entries<'a>(
    entries: impl IntoIterator<Item = CatalogEntry<'a>>,
    favorites: &FavoriteScoreTable,
) -> Vec<CatalogEntry<'a>> {
    let mut keyed: Vec<(CatalogEntry<'a>, f64)> = entries
        .into_iter()
        .map(|entry| {
            let score = favorites.get(&favorite_key(&entry));
            (entry, score)
        })
        .collect();

    keyed.sort_by(|(a, a_score), (b, b_score)| compare(a, *a_score, b, *b_score));
    keyed.into_iter().map(|(entry, _)| entry).collect()
}

/// Reorder already sorted entries by descending relevance, keeping the
/// existing order among equal scores
pub fn sort_by_relevance(entries: &mut [(CatalogEntry<'_>, f64)]) {
    entries.sort_by(|(_, a), (_, b)| b.total_cmp(a));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Item, ItemId, Publisher};

    fn catalog(rows: &[(&str, &str, &str)]) -> Catalog {
        let mut catalog = Catalog::default();
        for (publisher_name, item_name, item_slug) in rows {
            let slug = publisher_name.to_lowercase();
            let publisher = catalog
                .publishers()
                .iter()
                .position(|p| p.slug == slug)
                .map_or_else(
                    || {
                        catalog
                            .add_publisher(Publisher {
                                slug: slug.clone(),
                                name: (*publisher_name).into(),
                                brand: (*publisher_name).into(),
                            })
                            .unwrap()
                    },
                    crate::catalog::PublisherId,
                );
            catalog
                .add_item(Item {
                    publisher,
                    slug: (*item_slug).into(),
                    name: (*item_name).into(),
                    description: String::new(),
                    tags: vec![],
                })
                .unwrap();
        }
        catalog
    }

    fn slugs(entries: &[CatalogEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.item.slug.clone()).collect()
    }

    #[test]
    fn test_names_order_without_favorites() {
        let catalog = catalog(&[
            ("Zeta", "Alpha", "z-alpha"),
            ("Acme", "VCO", "a-vco"),
            ("Acme", "Filter", "a-filter"),
        ]);

        let sorted = sort_entries(catalog.entries(), &FavoriteScoreTable::new());
        assert_eq!(slugs(&sorted), vec!["a-filter", "a-vco", "z-alpha"]);
    }

    #[test]
    fn test_favorites_come_first() {
        let catalog = catalog(&[
            ("Acme", "Filter", "a-filter"),
            ("Acme", "VCO", "a-vco"),
            ("Zeta", "Alpha", "z-alpha"),
        ]);
        let favorites: FavoriteScoreTable = [
            (FavoriteKey::new("zeta", "z-alpha"), 2.0),
            (FavoriteKey::new("acme", "a-vco"), 0.5),
        ]
        .into_iter()
        .collect();

        let sorted = sort_entries(catalog.entries(), &favorites);
        assert_eq!(slugs(&sorted), vec!["z-alpha", "a-vco", "a-filter"]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let catalog = catalog(&[
            ("Acme", "Twin", "twin-b"),
            ("Acme", "Twin", "twin-a"),
        ]);
        let favorites = FavoriteScoreTable::new();

        let first = sort_entries(catalog.entries(), &favorites);
        let second = sort_entries(catalog.entries(), &favorites);
        assert_eq!(slugs(&first), vec!["twin-b", "twin-a"]);
        assert_eq!(slugs(&first), slugs(&second));
    }

    #[test]
    fn test_name_comparison_is_case_sensitive() {
        let catalog = catalog(&[("Acme", "alpha", "lower"), ("Acme", "Beta", "upper")]);
        let sorted = sort_entries(catalog.entries(), &FavoriteScoreTable::new());
        // Byte order puts uppercase first
        assert_eq!(slugs(&sorted), vec!["upper", "lower"]);
    }

    #[test]
    fn test_relevance_reorders_stably() {
        let catalog = catalog(&[
            ("Acme", "A", "a"),
            ("Acme", "B", "b"),
            ("Acme", "C", "c"),
        ]);
        let mut scored: Vec<_> = catalog
            .entries()
            .zip([10.0, 30.0, 10.0])
            .collect();

        sort_by_relevance(&mut scored);
        let order: Vec<ItemId> = scored.iter().map(|(e, _)| e.id).collect();
        assert_eq!(order, vec![ItemId(1), ItemId(0), ItemId(2)]);
    }
}
