//! Search and facet filtering
//!
//! Pure functions over a [`Catalog`](crate::catalog::Catalog):
//!
//! - `fuzzy`: scores an entry against a free-text query
//! - `filter`: decides visibility from search, brand and tag
//! - `facets`: decides which brand/tag values remain selectable
//!
//! None of these fail; unknown filter values just produce empty results.

pub mod facets;
pub mod filter;
pub mod fuzzy;

pub use facets::{FacetAvailability, FacetEntry};
pub use filter::{FilterInputs, is_visible, matches_facets};
pub use fuzzy::{FuzzyScorer, NEUTRAL_SCORE, searchable_text};
