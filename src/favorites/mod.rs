//! Favorite scores
//!
//! Each selection decays every stored score by 10% and then adds `1.0` to the
//! chosen item, so frequently and recently chosen items stay on top while the
//! rest fade toward zero.
//!
//! The table is owned by whoever drives the session; persistence goes through
//! the [`FavoriteStore`] trait in [`store`].

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{FavoriteStore, SledFavoriteStore};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fraction of every score removed on each selection
pub const DECAY_LAMBDA: f64 = 0.1;

/// Amount added to the selected item's score
pub const SELECTION_INCREMENT: f64 = 1.0;

/// Identifies a popularity counter: (publisher slug, item slug)
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct FavoriteKey {
    pub publisher: String,
    pub item: String,
}

impl FavoriteKey {
    #[must_use]
    pub fn new(publisher: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            publisher: publisher.into(),
            item: item.into(),
        }
    }
}

impl fmt::Display for FavoriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.publisher, self.item)
    }
}

/// Mapping of favorite keys to non-negative scores
///
/// Absent keys score `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteScoreTable {
    scores: BTreeMap<FavoriteKey, f64>,
}

impl FavoriteScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for `key`, `0.0` when absent
    #[must_use]
    pub fn get(&self, key: &FavoriteKey) -> f64 {
        self.scores.get(key).copied().unwrap_or(0.0)
    }

    /// Store a score, ignoring negative or non-finite values
    ///
    /// Returns `false` if the value was rejected.
    pub fn insert(&mut self, key: FavoriteKey, score: f64) -> bool {
        if !score.is_finite() || score < 0.0 {
            return false;
        }
        self.scores.insert(key, score);
        true
    }

    #[must_use]
    pub fn contains(&self, key: &FavoriteKey) -> bool {
        self.scores.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&FavoriteKey, f64)> {
        self.scores.iter().map(|(k, v)| (k, *v))
    }

    /// Entries ordered by descending score, then key
    #[must_use]
    pub fn ranked(&self) -> Vec<(&FavoriteKey, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl FromIterator<(FavoriteKey, f64)> for FavoriteScoreTable {
    fn from_iter<T: IntoIterator<Item = (FavoriteKey, f64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (key, score) in iter {
            table.insert(key, score);
        }
        table
    }
}

/// Record one selection of `key`
///
/// Decays every existing entry by [`DECAY_LAMBDA`] first, then adds
/// [`SELECTION_INCREMENT`] to `key`, so the selected item gets the full
/// increment. Returns the new score of `key`.
pub fn record_selection(table: &mut FavoriteScoreTable, key: FavoriteKey) -> f64 {
    for score in table.scores.values_mut() {
        *score *= 1.0 - DECAY_LAMBDA;
    }
    let score = table.scores.entry(key).or_insert(0.0);
    *score += SELECTION_INCREMENT;
    *score
}
