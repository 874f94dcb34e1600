//! Browse session management
//!
//! A [`BrowseSession`] owns the current search/brand/tag state and the
//! favorite score table, and republishes a [`BrowseSnapshot`] after every
//! state change.
//!
//! # Workflow
//!
//! ```text
//! Session created (initial recompute)
//!     ↓
//! ┌─→ Input event
//! │   ├─ set_search(text)  → trim, store
//! │   ├─ toggle_brand(b)   → select b, or clear if already selected
//! │   ├─ toggle_tag(t)     → select t, or clear if already selected
//! │   ├─ clear_all()       → reset search, brand and tag
//! │   └─ select_item(id)   → bump favorites, notify SelectionSink
//! │       ↓
//! │   Recompute: visibility → sort → facet availability → counters
//! └───────┘
//! ```
//!
//! Every transition runs to completion synchronously. The session is not
//! meant to be shared between threads; wrap it in a lock if needed.

use crate::browse::sort::{SortMode, favorite_key, sort_by_relevance, sort_entries};
use crate::catalog::{Catalog, CatalogEntry, ItemId};
use crate::favorites::{self, FavoriteKey, FavoriteScoreTable};
use crate::search::{FacetAvailability, FacetEntry, FilterInputs, FuzzyScorer, is_visible, matches_facets};
use tracing::{debug, info};

/// Browse session result type
pub type Result<T> = std::result::Result<T, BrowseError>;

/// Errors that can occur during a browse session
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    #[error("Unknown item id: {0}")]
    UnknownItem(usize),

    #[error("Item not found: {0}")]
    NotFound(FavoriteKey),
}

/// Mutable filter state of a session
///
/// Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    pub search: String,
    pub brand: String,
    pub tag: String,
}

impl BrowseState {
    /// Borrow the state as filter inputs
    #[must_use]
    pub fn inputs(&self) -> FilterInputs<'_> {
        FilterInputs::new(&self.search, &self.brand, &self.tag)
    }

    /// True when no filter is active
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.inputs().is_empty()
    }
}

/// Toggle a single-valued selection: reselecting clears it
fn toggle(current: &mut String, value: &str) {
    if current.as_str() == value {
        current.clear();
    } else {
        value.clone_into(current);
    }
}

/// Display counters published with each snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Visible items
    pub items: usize,

    /// Selectable brands
    pub brands: usize,

    /// Selectable tags
    pub tags: usize,

    /// Publishers in the catalog
    pub publishers: usize,
}

impl Counters {
    #[must_use]
    pub fn items_label(&self) -> String {
        format!("Modules ({})", self.items)
    }

    #[must_use]
    pub fn brands_label(&self) -> String {
        format!("Brands ({})", self.brands)
    }

    #[must_use]
    pub fn tags_label(&self) -> String {
        format!("Tags ({})", self.tags)
    }

    #[must_use]
    pub fn publishers_label(&self) -> String {
        format!("Publishers ({})", self.publishers)
    }
}

/// Render-ready result of one recompute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseSnapshot {
    /// Visible items in display order
    pub items: Vec<ItemId>,

    /// Brand facet values, ordered case-insensitively
    pub brands: Vec<FacetEntry>,

    /// Tag facet values, in allowed-tag order
    pub tags: Vec<FacetEntry>,

    pub counters: Counters,
}

/// Undo/history record emitted when an item is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryAction {
    /// Human-readable action name
    pub name: String,

    /// Item that was added
    pub key: FavoriteKey,
}

/// Collaborator notified when an item is chosen
pub trait SelectionSink {
    /// Materialize the chosen item
    fn instantiate(&mut self, entry: CatalogEntry<'_>);

    /// Record an undoable action
    fn push_history(&mut self, action: HistoryAction);

    /// Favorite scores changed and may be persisted
    fn favorites_changed(&mut self, table: &FavoriteScoreTable);
}

/// Browse session over a read-only catalog
pub struct BrowseSession<'a> {
    catalog: &'a Catalog,
    favorites: FavoriteScoreTable,
    state: BrowseState,
    sort_mode: SortMode,
    scorer: FuzzyScorer,
    snapshot: BrowseSnapshot,
}

impl<'a> BrowseSession<'a> {
    /// Create a session and compute the initial snapshot
    #[must_use]
    pub fn new(catalog: &'a Catalog, favorites: FavoriteScoreTable) -> Self {
        Self::with_sort_mode(catalog, favorites, SortMode::default())
    }

    /// Create a session with an explicit sort mode
    #[must_use]
    pub fn with_sort_mode(
        catalog: &'a Catalog,
        favorites: FavoriteScoreTable,
        sort_mode: SortMode,
    ) -> Self {
        let mut session = Self {
            catalog,
            favorites,
            state: BrowseState::default(),
            sort_mode,
            scorer: FuzzyScorer::new(),
            snapshot: BrowseSnapshot::default(),
        };
        session.refresh();
        session
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn state(&self) -> &BrowseState {
        &self.state
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteScoreTable {
        &self.favorites
    }

    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Latest published snapshot
    #[must_use]
    pub const fn snapshot(&self) -> &BrowseSnapshot {
        &self.snapshot
    }

    /// Visible entries of the latest snapshot, in display order
    pub fn visible_entries(&self) -> impl Iterator<Item = CatalogEntry<'a>> + '_ {
        let catalog = self.catalog;
        self.snapshot.items.iter().filter_map(move |id| catalog.entry(*id))
    }

    /// Set the search text (trimmed) and recompute
    pub fn set_search(&mut self, text: &str) -> &BrowseSnapshot {
        text.trim().clone_into(&mut self.state.search);
        self.refresh()
    }

    /// Select `brand`, or clear it if already selected, and recompute
    pub fn toggle_brand(&mut self, brand: &str) -> &BrowseSnapshot {
        toggle(&mut self.state.brand, brand);
        self.refresh()
    }

    /// Select `tag`, or clear it if already selected, and recompute
    pub fn toggle_tag(&mut self, tag: &str) -> &BrowseSnapshot {
        toggle(&mut self.state.tag, tag);
        self.refresh()
    }

    /// Reset search, brand and tag, and recompute
    pub fn clear_all(&mut self) -> &BrowseSnapshot {
        self.state = BrowseState::default();
        self.refresh()
    }

    /// Handle the escape key
    ///
    /// Clears a non-empty search and returns `false`. With an empty search,
    /// returns `true` to tell the caller to close the browser.
    pub fn escape(&mut self) -> bool {
        if self.state.search.is_empty() {
            return true;
        }
        self.state.search.clear();
        self.refresh();
        false
    }

    /// Record a selection of `id` and notify `sink`
    ///
    /// Returns the item's new favorite score. Filter state is left untouched;
    /// the new ordering shows up on the next recompute.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::UnknownItem` if `id` is not in the catalog.
    pub fn select_item(&mut self, id: ItemId, sink: &mut dyn SelectionSink) -> Result<f64> {
        let entry = self
            .catalog
            .entry(id)
            .ok_or(BrowseError::UnknownItem(id.0))?;
        let key = favorite_key(&entry);

        let score = favorites::record_selection(&mut self.favorites, key.clone());
        info!(item = %key, score, "Selected item");

        sink.instantiate(entry);
        sink.push_history(HistoryAction {
            name: "create module".into(),
            key,
        });
        sink.favorites_changed(&self.favorites);
        Ok(score)
    }

    /// Record a selection by publisher and item slug
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::NotFound` if no such item exists.
    pub fn select_by_key(
        &mut self,
        publisher: &str,
        item: &str,
        sink: &mut dyn SelectionSink,
    ) -> Result<f64> {
        let id = self
            .catalog
            .find(publisher, item)
            .map(|entry| entry.id)
            .ok_or_else(|| BrowseError::NotFound(FavoriteKey::new(publisher, item)))?;
        self.select_item(id, sink)
    }

    /// Recompute visibility, order, facets and counters
    ///
    /// Idempotent: with unchanged state the snapshot is identical.
    pub fn refresh(&mut self) -> &BrowseSnapshot {
        let inputs = self.state.inputs();
        let search_only = inputs.search_only();

        let mut passes_search = vec![false; self.catalog.len()];
        let mut filtered: Vec<CatalogEntry<'a>> = Vec::new();
        for entry in self.catalog.entries() {
            if is_visible(&mut self.scorer, &entry, search_only) {
                passes_search[entry.id.0] = true;
                filtered.push(entry);
            }
        }

        // Sort the whole catalog before filtering so catalog order never leaks
        let sorted = sort_entries(self.catalog.entries(), &self.favorites);
        let visible = sorted
            .into_iter()
            .filter(|e| passes_search[e.id.0] && matches_facets(e, inputs.brand, inputs.tag));

        let items: Vec<ItemId> = if self.sort_mode == SortMode::Relevance && !inputs.search.is_empty() {
            let mut scored: Vec<(CatalogEntry<'a>, f64)> = visible
                .map(|e| {
                    let score = self.scorer.score(&e, inputs.search);
                    (e, score)
                })
                .collect();
            sort_by_relevance(&mut scored);
            scored.into_iter().map(|(e, _)| e.id).collect()
        } else {
            visible.map(|e| e.id).collect()
        };

        let facets = FacetAvailability::from_prefiltered(self.catalog, &filtered, inputs);
        let counters = Counters {
            items: items.len(),
            brands: facets.enabled_brands(),
            tags: facets.enabled_tags(),
            publishers: self.catalog.publishers().len(),
        };

        debug!(
            search = %inputs.search,
            brand = %inputs.brand,
            tag = %inputs.tag,
            visible = counters.items,
            brands = counters.brands,
            tags = counters.tags,
            "Recomputed browse snapshot"
        );

        self.snapshot = BrowseSnapshot {
            items,
            brands: facets.brands,
            tags: facets.tags,
            counters,
        };
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSink, acme_beta_catalog, catalog_from_rows};

    fn visible_slugs(session: &BrowseSession<'_>) -> Vec<String> {
        session
            .visible_entries()
            .map(|e| e.item.slug.clone())
            .collect()
    }

    #[test]
    fn test_initial_snapshot_shows_everything() {
        let catalog = acme_beta_catalog();
        let session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        assert!(session.state().is_clear());
        assert_eq!(session.snapshot().counters.items, 3);
        assert_eq!(session.snapshot().counters.publishers, 2);
        assert_eq!(
            visible_slugs(&session),
            vec!["acme-filter", "acme-vco", "beta-filter2"]
        );
    }

    #[test]
    fn test_set_search_trims() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        session.set_search("  vco \n");
        assert_eq!(session.state().search, "vco");
        assert_eq!(visible_slugs(&session), vec!["acme-vco"]);
    }

    #[test]
    fn test_toggle_brand_twice_clears() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        session.toggle_brand("Acme");
        assert_eq!(session.state().brand, "Acme");
        assert_eq!(session.snapshot().counters.items, 2);

        session.toggle_brand("Acme");
        assert!(session.state().brand.is_empty());
        assert_eq!(session.snapshot().counters.items, 3);
    }

    #[test]
    fn test_toggle_switches_between_values() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        session.toggle_tag("filter");
        session.toggle_tag("oscillator");
        assert_eq!(session.state().tag, "oscillator");
        assert_eq!(visible_slugs(&session), vec!["acme-vco"]);
    }

    #[test]
    fn test_clear_all() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        session.set_search("filter");
        session.toggle_brand("Beta");
        session.toggle_tag("filter");
        assert_eq!(session.snapshot().counters.items, 1);

        session.clear_all();
        assert!(session.state().is_clear());
        assert_eq!(session.snapshot().counters.items, 3);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());
        session.set_search("fil");
        session.toggle_tag("filter");

        let first = session.refresh().clone();
        let second = session.refresh().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_brand_yields_empty_but_usable_facets() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        session.toggle_brand("Nobody");
        assert!(session.snapshot().items.is_empty());
        assert_eq!(session.snapshot().counters.tags, 0);
        assert_eq!(session.snapshot().counters.brands, 2);

        session.clear_all();
        assert_eq!(session.snapshot().counters.items, 3);
    }

    #[test]
    fn test_escape_clears_search_then_closes() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());

        session.set_search("vco");
        assert!(!session.escape());
        assert!(session.state().search.is_empty());
        assert_eq!(session.snapshot().counters.items, 3);
        assert!(session.escape());
    }

    #[test]
    fn test_select_item_notifies_sink_and_bumps_score() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());
        let mut sink = RecordingSink::default();
        session.toggle_tag("filter");
        let state_before = session.state().clone();

        let id = catalog.find("beta", "beta-filter2").unwrap().id;
        let score = session.select_item(id, &mut sink).unwrap();

        assert!((score - 1.0).abs() < f64::EPSILON);
        assert_eq!(sink.instantiated, vec![FavoriteKey::new("beta", "beta-filter2")]);
        assert_eq!(sink.history.len(), 1);
        assert_eq!(sink.history[0].name, "create module");
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(session.state(), &state_before);
    }

    #[test]
    fn test_selection_reorders_after_refresh() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());
        let mut sink = RecordingSink::default();

        session.select_by_key("beta", "beta-filter2", &mut sink).unwrap();
        session.refresh();
        assert_eq!(
            visible_slugs(&session),
            vec!["beta-filter2", "acme-filter", "acme-vco"]
        );
    }

    #[test]
    fn test_select_unknown_item() {
        let catalog = acme_beta_catalog();
        let mut session = BrowseSession::new(&catalog, FavoriteScoreTable::new());
        let mut sink = RecordingSink::default();

        assert!(matches!(
            session.select_item(ItemId(99), &mut sink),
            Err(BrowseError::UnknownItem(99))
        ));
        assert!(matches!(
            session.select_by_key("acme", "missing", &mut sink),
            Err(BrowseError::NotFound(_))
        ));
        assert!(sink.instantiated.is_empty());
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_search_keeps_popularity_order_by_default() {
        let catalog = acme_beta_catalog();
        let favorites: FavoriteScoreTable = [(FavoriteKey::new("beta", "beta-filter2"), 5.0)]
            .into_iter()
            .collect();
        let mut session = BrowseSession::new(&catalog, favorites);

        session.set_search("acme-filter");
        // beta-filter2 only matches as a scattered subsequence, if at all
        let slugs = visible_slugs(&session);
        assert_eq!(slugs.first().map(String::as_str), Some("acme-filter"));

        session.set_search("filter");
        assert_eq!(
            visible_slugs(&session),
            vec!["beta-filter2", "acme-filter"]
        );
    }

    #[test]
    fn test_relevance_mode_ranks_by_match_quality() {
        // "vco" is contiguous in acme-vco but scattered over "velvet chorus"
        let catalog = catalog_from_rows(
            &["oscillator"],
            &[
                ("Acme", "VCO", "acme-vco", &["oscillator"]),
                ("Beta", "Velvet Chorus", "beta-velvet", &[]),
            ],
        );
        let favorites: FavoriteScoreTable = [(FavoriteKey::new("beta", "beta-velvet"), 5.0)]
            .into_iter()
            .collect();

        let mut popular = BrowseSession::new(&catalog, favorites.clone());
        popular.set_search("vco");
        assert_eq!(visible_slugs(&popular), vec!["beta-velvet", "acme-vco"]);

        let mut relevant = BrowseSession::with_sort_mode(&catalog, favorites, SortMode::Relevance);
        assert_eq!(relevant.sort_mode(), SortMode::Relevance);
        assert_eq!(visible_slugs(&relevant), vec!["beta-velvet", "acme-vco"]);

        relevant.set_search("vco");
        assert_eq!(visible_slugs(&relevant), vec!["acme-vco", "beta-velvet"]);

        relevant.set_search("");
        assert_eq!(visible_slugs(&relevant), vec!["beta-velvet", "acme-vco"]);
    }

    #[test]
    fn test_counter_labels() {
        let counters = Counters {
            items: 3,
            brands: 2,
            tags: 1,
            publishers: 2,
        };
        assert_eq!(counters.items_label(), "Modules (3)");
        assert_eq!(counters.brands_label(), "Brands (2)");
        assert_eq!(counters.tags_label(), "Tags (1)");
        assert_eq!(counters.publishers_label(), "Publishers (2)");
    }
}
