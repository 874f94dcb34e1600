//! Facet availability
//!
//! For every brand and tag candidate, decide whether selecting it would leave
//! at least one item visible.
//!
//! The search is applied once to build a prefiltered set. Each brand candidate
//! is then checked against that set combined with the *current* tag, and each
//! tag candidate against the set combined with the *current* brand, so a
//! candidate costs one pass over the prefiltered items and no fuzzy scoring.

use super::filter::{FilterInputs, is_visible, matches_facets};
use super::fuzzy::FuzzyScorer;
use crate::catalog::{Catalog, CatalogEntry, ItemId};

/// One selectable facet value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetEntry {
    /// Value shown to the user and passed back on selection
    pub label: String,

    /// Selecting this value would leave at least one item visible
    pub enabled: bool,

    /// This value is the current selection
    pub active: bool,
}

/// Availability of every brand and tag candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetAvailability {
    pub brands: Vec<FacetEntry>,
    pub tags: Vec<FacetEntry>,

    /// Items passing the search alone, in catalog order
    pub filtered_by_search: Vec<ItemId>,
}

impl FacetAvailability {
    /// Compute availability for the catalog under `inputs`
    pub fn compute(catalog: &Catalog, scorer: &mut FuzzyScorer, inputs: FilterInputs<'_>) -> Self {
        let search_only = inputs.search_only();
        let filtered: Vec<CatalogEntry<'_>> = catalog
            .entries()
            .filter(|entry| is_visible(scorer, entry, search_only))
            .collect();

        Self::from_prefiltered(catalog, &filtered, inputs)
    }

    /// Compute availability from an already search-filtered entry list
    #[must_use]
    pub fn from_prefiltered(
        catalog: &Catalog,
        filtered: &[CatalogEntry<'_>],
        inputs: FilterInputs<'_>,
    ) -> Self {
        let has_item = |brand: &str, tag: &str| filtered.iter().any(|e| matches_facets(e, brand, tag));

        let brands = catalog
            .brands()
            .into_iter()
            .map(|brand| FacetEntry {
                enabled: has_item(&brand, inputs.tag),
                active: brand == inputs.brand,
                label: brand,
            })
            .collect();

        let tags = catalog
            .allowed_tags()
            .as_slice()
            .iter()
            .map(|tag| FacetEntry {
                label: tag.clone(),
                enabled: has_item(inputs.brand, tag),
                active: *tag == inputs.tag,
            })
            .collect();

        Self {
            brands,
            tags,
            filtered_by_search: filtered.iter().map(|e| e.id).collect(),
        }
    }

    /// Number of selectable brands
    #[must_use]
    pub fn enabled_brands(&self) -> usize {
        self.brands.iter().filter(|f| f.enabled).count()
    }

    /// Number of selectable tags
    #[must_use]
    pub fn enabled_tags(&self) -> usize {
        self.tags.iter().filter(|f| f.enabled).count()
    }

    /// Look up a brand facet by label
    #[must_use]
    pub fn brand(&self, label: &str) -> Option<&FacetEntry> {
        self.brands.iter().find(|f| f.label == label)
    }

    /// Look up a tag facet by label
    #[must_use]
    pub fn tag(&self, label: &str) -> Option<&FacetEntry> {
        self.tags.iter().find(|f| f.label == label)
    }
}
