//! Persistence for favorite scores
//!
//! The ranking works on an in-memory [`FavoriteScoreTable`]; a
//! [`FavoriteStore`] loads it at session start and writes it back after
//! selections. [`SledFavoriteStore`] keeps scores in a sled tree with
//! bincode-encoded keys and values.

use super::{FavoriteKey, FavoriteScoreTable, StoreError};
use sled::{Db, Tree};
use std::path::Path;
use tracing::{debug, warn};

/// Backing store for favorite scores
pub trait FavoriteStore {
    /// Load all stored scores
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be read.
    fn load(&self) -> Result<FavoriteScoreTable, StoreError>;

    /// Replace the stored scores with `table`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing store cannot be written.
    fn save(&self, table: &FavoriteScoreTable) -> Result<(), StoreError>;
}

/// Favorite store backed by a sled database
pub struct SledFavoriteStore {
    db: Db,
    favorites: Tree,
}

impl SledFavoriteStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let favorites = db.open_tree("favorites")?;
        Ok(Self { db, favorites })
    }

    /// Number of stored entries
    #[must_use]
    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Remove every stored score
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tree cannot be cleared.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.favorites.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the flush fails.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl FavoriteStore for SledFavoriteStore {
    fn load(&self) -> Result<FavoriteScoreTable, StoreError> {
        let mut table = FavoriteScoreTable::new();

        for entry in self.favorites.iter() {
            let (key, value) = entry?;
            let (key, _): (FavoriteKey, usize) =
                bincode::decode_from_slice(&key, bincode::config::standard())?;
            let (score, _): (f64, usize) =
                bincode::decode_from_slice(&value, bincode::config::standard())?;

            if !table.insert(key.clone(), score) {
                warn!(key = %key, score, "Ignoring invalid stored favorite score");
            }
        }

        debug!(entries = table.len(), "Loaded favorite scores");
        Ok(table)
    }

    fn save(&self, table: &FavoriteScoreTable) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for key in self.favorites.iter().keys() {
            batch.remove(key?);
        }
        for (key, score) in table.iter() {
            let key = bincode::encode_to_vec(key, bincode::config::standard())?;
            let value = bincode::encode_to_vec(score, bincode::config::standard())?;
            batch.insert(key, value);
        }

        self.favorites.apply_batch(batch)?;
        self.flush()?;
        debug!(entries = table.len(), "Saved favorite scores");
        Ok(())
    }
}
