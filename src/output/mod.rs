//! Output formatting for CLI display
//!
//! Renders browse snapshots, facet lists and favorite scores as text.

use crate::browse::{BrowseSession, favorite_key};
use crate::catalog::CatalogEntry;
use crate::favorites::FavoriteKey;
use crate::search::FacetEntry;
use colored::Colorize;
use std::fmt::Write;

/// Format a visible item
///
/// Quiet mode prints only the `publisher/item` key.
#[must_use]
pub fn item_line(entry: &CatalogEntry<'_>, score: f64, quiet: bool) -> String {
    let key = favorite_key(entry);
    if quiet {
        return key.to_string();
    }

    let title = format!("{} {}", entry.publisher.brand, entry.item.name);
    let mut line = format!("  {} ({})", title.bold(), key.to_string().dimmed());
    if !entry.item.tags.is_empty() {
        let _ = write!(line, " [{}]", entry.item.tags.join(", "));
    }
    if score > 0.0 {
        let _ = write!(line, " {}", format!("★{score:.2}").yellow());
    }
    line
}

/// Format one facet value
///
/// Active values are marked `[x]`, selectable ones `[ ]`, and values that
/// would yield nothing `[-]`.
#[must_use]
pub fn facet_line(facet: &FacetEntry) -> String {
    if facet.active {
        format!("  [x] {}", facet.label.green().bold())
    } else if facet.enabled {
        format!("  [ ] {}", facet.label)
    } else {
        format!("  [-] {}", facet.label.dimmed())
    }
}

/// Format a stored favorite score
#[must_use]
pub fn favorite_line(key: &FavoriteKey, score: f64, quiet: bool) -> String {
    if quiet {
        format!("{key}\t{score:.4}")
    } else {
        format!("  {} {}", format!("{score:>8.4}").yellow(), key)
    }
}

/// Render the session's latest snapshot
///
/// `limit` caps the number of items printed; counters always reflect the
/// full visible set.
#[must_use]
pub fn render_snapshot(session: &BrowseSession<'_>, limit: Option<usize>, quiet: bool) -> String {
    let snapshot = session.snapshot();
    let favorites = session.favorites();
    let limit = limit.unwrap_or(usize::MAX);
    let mut out = String::new();

    if quiet {
        for entry in session.visible_entries().take(limit) {
            let score = favorites.get(&favorite_key(&entry));
            let _ = writeln!(out, "{}", item_line(&entry, score, true));
        }
        return out;
    }

    let counters = &snapshot.counters;
    let _ = writeln!(out, "{}", counters.items_label().cyan().bold());
    if snapshot.items.is_empty() {
        let _ = writeln!(out, "  (no matching modules)");
    }
    for entry in session.visible_entries().take(limit) {
        let score = favorites.get(&favorite_key(&entry));
        let _ = writeln!(out, "{}", item_line(&entry, score, false));
    }
    if snapshot.items.len() > limit {
        let _ = writeln!(out, "  ... {} more", snapshot.items.len() - limit);
    }

    let _ = writeln!(out, "{}", counters.publishers_label().dimmed());
    let _ = writeln!(out, "{}", counters.brands_label().cyan().bold());
    for facet in &snapshot.brands {
        let _ = writeln!(out, "{}", facet_line(facet));
    }

    let _ = writeln!(out, "{}", counters.tags_label().cyan().bold());
    for facet in &snapshot.tags {
        let _ = writeln!(out, "{}", facet_line(facet));
    }

    out
}
