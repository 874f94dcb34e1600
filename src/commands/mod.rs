//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs against the loaded catalog and favorite store. Output goes to the
//! writer passed in, so commands can be driven from tests.

pub mod browse;
pub mod favorites;
pub mod select;
pub mod shell;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use favorites::execute as favorites;
pub use select::execute as select;
pub use shell::execute as shell;

use crate::browse::{HistoryAction, SelectionSink};
use crate::catalog::CatalogEntry;
use crate::favorites::{FavoriteScoreTable, FavoriteStore};
use crate::ModbrowseError;
use std::io::Write;
use tracing::debug;

type Result<T> = std::result::Result<T, ModbrowseError>;

/// Selection sink that reports additions and writes favorites back to a store
///
/// Sink callbacks cannot fail, so the first error is kept and returned by
/// [`CliSink::finish`].
pub struct CliSink<'a, W: Write> {
    store: &'a dyn FavoriteStore,
    out: &'a mut W,
    quiet: bool,
    error: Option<ModbrowseError>,
}

impl<'a, W: Write> CliSink<'a, W> {
    pub fn new(store: &'a dyn FavoriteStore, out: &'a mut W, quiet: bool) -> Self {
        Self {
            store,
            out,
            quiet,
            error: None,
        }
    }

    /// Surface the first error raised while handling notifications
    ///
    /// # Errors
    ///
    /// Returns the stored write or persistence error, if any.
    pub fn finish(self) -> Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn keep_error(&mut self, error: impl Into<ModbrowseError>) {
        if self.error.is_none() {
            self.error = Some(error.into());
        }
    }
}

impl<W: Write> SelectionSink for CliSink<'_, W> {
    fn instantiate(&mut self, entry: CatalogEntry<'_>) {
        if self.quiet {
            return;
        }
        if let Err(e) = writeln!(self.out, "Added {}", entry.summary()) {
            self.keep_error(e);
        }
    }

    fn push_history(&mut self, action: HistoryAction) {
        debug!(action = %action.name, item = %action.key, "History entry");
    }

    fn favorites_changed(&mut self, table: &FavoriteScoreTable) {
        if let Err(e) = self.store.save(table) {
            self.keep_error(e);
        }
    }
}
