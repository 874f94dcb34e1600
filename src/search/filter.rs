//! Visibility of catalog entries under the active filters
//!
//! An entry is visible when every active constraint holds:
//!
//! - non-empty search: the fuzzy score is positive
//! - non-empty brand: the publisher brand equals it exactly
//! - non-empty tag: the item carries it exactly
//!
//! Empty strings mean "no constraint". A brand or tag that matches nothing in
//! the catalog is not an error; it simply hides everything.

use super::fuzzy::FuzzyScorer;
use crate::catalog::CatalogEntry;

/// The three filter inputs of a visibility check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterInputs<'a> {
    pub search: &'a str,
    pub brand: &'a str,
    pub tag: &'a str,
}

impl<'a> FilterInputs<'a> {
    #[must_use]
    pub const fn new(search: &'a str, brand: &'a str, tag: &'a str) -> Self {
        Self { search, brand, tag }
    }

    /// Same search, facet constraints dropped
    #[must_use]
    pub const fn search_only(&self) -> Self {
        Self {
            search: self.search,
            brand: "",
            tag: "",
        }
    }

    /// True when no constraint is active
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.search.is_empty() && self.brand.is_empty() && self.tag.is_empty()
    }
}

/// Check whether `entry` passes all active constraints
pub fn is_visible(scorer: &mut FuzzyScorer, entry: &CatalogEntry<'_>, inputs: FilterInputs<'_>) -> bool {
    if !inputs.search.is_empty() && scorer.score(entry, inputs.search) <= 0.0 {
        return false;
    }
    matches_facets(entry, inputs.brand, inputs.tag)
}

/// Check only the brand and tag constraints
#[must_use]
pub fn matches_facets(entry: &CatalogEntry<'_>, brand: &str, tag: &str) -> bool {
    if !brand.is_empty() && entry.publisher.brand != brand {
        return false;
    }
    if !tag.is_empty() && !entry.item.has_tag(tag) {
        return false;
    }
    true
}
