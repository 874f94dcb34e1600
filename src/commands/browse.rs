//! Browse command - print the filtered catalog

use crate::{
    ModbrowseError,
    browse::{BrowseSession, SortMode},
    catalog::Catalog,
    cli::FilterArgs,
    favorites::FavoriteScoreTable,
    output,
};
use std::io::Write;

type Result<T> = std::result::Result<T, ModbrowseError>;

/// Apply command-line filters to a fresh session
///
/// Tag names are matched to the allowed tag list ignoring case.
pub fn apply_filters(session: &mut BrowseSession<'_>, filters: &FilterArgs) {
    if let Some(search) = &filters.search {
        session.set_search(search);
    }
    if let Some(brand) = &filters.brand {
        session.toggle_brand(brand);
    }
    if let Some(tag) = &filters.tag {
        let tag = session
            .catalog()
            .allowed_tags()
            .canonical(tag)
            .unwrap_or(tag.as_str())
            .to_string();
        session.toggle_tag(&tag);
    }
}

/// Execute the browse command
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn execute<W: Write>(
    catalog: &Catalog,
    favorites: FavoriteScoreTable,
    filters: &FilterArgs,
    limit: Option<usize>,
    sort_mode: SortMode,
    quiet: bool,
    out: &mut W,
) -> Result<()> {
    let mut session = BrowseSession::with_sort_mode(catalog, favorites, sort_mode);
    apply_filters(&mut session, filters);

    write!(out, "{}", output::render_snapshot(&session, limit, quiet))?;
    Ok(())
}
