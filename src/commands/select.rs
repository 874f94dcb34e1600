//! Select command - record a selection and persist favorite scores

use super::CliSink;
use crate::{
    ModbrowseError,
    browse::BrowseSession,
    catalog::Catalog,
    favorites::FavoriteStore,
};
use std::io::Write;

type Result<T> = std::result::Result<T, ModbrowseError>;

/// Execute the select command
///
/// Returns the item's new favorite score.
///
/// # Errors
/// Returns an error if the item does not exist or the store cannot be read or written
pub fn execute<W: Write>(
    catalog: &Catalog,
    store: &dyn FavoriteStore,
    publisher: &str,
    item: &str,
    quiet: bool,
    out: &mut W,
) -> Result<f64> {
    let favorites = store.load()?;
    let mut session = BrowseSession::new(catalog, favorites);

    let mut sink = CliSink::new(store, out, quiet);
    let score = session.select_by_key(publisher, item, &mut sink)?;
    sink.finish()?;

    if quiet {
        writeln!(out, "{score:.4}")?;
    } else {
        writeln!(out, "Favorite score is now {score:.4}")?;
    }
    Ok(score)
}
