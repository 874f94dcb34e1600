//! Browse module - session state, ordering and result snapshots
//!
//! This module drives the faceted browser. It is UI-agnostic: frontends feed
//! input events into a [`BrowseSession`] and render the [`BrowseSnapshot`] it
//! publishes.
//!
//! # Architecture
//!
//! - `session`: state machine over search/brand/tag, recompute and selection
//! - `sort`: popularity-then-name ordering of catalog entries

pub mod session;
pub mod sort;

pub use session::{
    BrowseError, BrowseSession, BrowseSnapshot, BrowseState, Counters, HistoryAction,
    SelectionSink,
};
pub use sort::{SortMode, compare, favorite_key, sort_by_relevance, sort_entries};
