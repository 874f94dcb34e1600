//! Favorites command - list or clear stored favorite scores

use crate::{
    ModbrowseError,
    favorites::{FavoriteScoreTable, FavoriteStore},
    output,
};
use std::io::Write;

type Result<T> = std::result::Result<T, ModbrowseError>;

/// Execute the favorites command
///
/// # Errors
/// Returns an error if the store cannot be read or written, or output fails
pub fn execute<W: Write>(store: &dyn FavoriteStore, clear: bool, quiet: bool, out: &mut W) -> Result<()> {
    if clear {
        store.save(&FavoriteScoreTable::new())?;
        if !quiet {
            writeln!(out, "Cleared favorite scores.")?;
        }
        return Ok(());
    }

    let table = store.load()?;
    if table.is_empty() {
        if !quiet {
            writeln!(out, "No favorites recorded yet.")?;
        }
        return Ok(());
    }

    if !quiet {
        writeln!(out, "Favorites ({}):", table.len())?;
    }
    for (key, score) in table.ranked() {
        writeln!(out, "{}", output::favorite_line(key, score, quiet))?;
    }
    Ok(())
}
