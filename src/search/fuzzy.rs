//! Fuzzy scoring of catalog entries against a search query
//!
//! Uses the nucleo matcher for order-preserving, non-contiguous matching.
//! Contiguous runs and word-boundary hits earn bonuses while gaps are
//! penalised, so a literal substring always outranks the same characters
//! scattered across the text.

use crate::catalog::CatalogEntry;
use nucleo::{Config, Matcher, Utf32Str};

/// Score returned for an empty query
pub const NEUTRAL_SCORE: f64 = 1.0;

/// Scores catalog entries against a query
///
/// Holds the matcher and scratch buffers so repeated scoring during a
/// recompute does not reallocate. Scoring is still a pure function of the
/// entry content and the query.
pub struct FuzzyScorer {
    matcher: Matcher,
    haystack_buf: Vec<char>,
    needle_buf: Vec<char>,
}

impl FuzzyScorer {
    /// Accented characters only match themselves; the query is never folded
    /// to ASCII, so the text must not be either.
    #[must_use]
    pub fn new() -> Self {
        let mut config = Config::DEFAULT;
        config.normalize = false;
        Self {
            matcher: Matcher::new(config),
            haystack_buf: Vec::new(),
            needle_buf: Vec::new(),
        }
    }

    /// Score `entry` against `query`
    ///
    /// Returns [`NEUTRAL_SCORE`] for an empty query. Otherwise returns the
    /// match score, where anything `<= 0.0` means no match.
    pub fn score(&mut self, entry: &CatalogEntry<'_>, query: &str) -> f64 {
        if query.is_empty() {
            return NEUTRAL_SCORE;
        }
        let text = searchable_text(entry).to_lowercase();
        self.score_text(&text, &query.to_lowercase())
    }

    /// Score already lower-cased text against an already lower-cased query
    pub fn score_text(&mut self, text: &str, query: &str) -> f64 {
        if query.is_empty() {
            return NEUTRAL_SCORE;
        }
        if text.is_empty() {
            return 0.0;
        }

        self.haystack_buf.clear();
        self.needle_buf.clear();
        let haystack = Utf32Str::new(text, &mut self.haystack_buf);
        let needle = Utf32Str::new(query, &mut self.needle_buf);

        self.matcher
            .fuzzy_match(haystack, needle)
            .map_or(0.0, f64::from)
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the text a query is matched against
///
/// Brand, item name, item slug and each tag in stored order, space-separated.
#[must_use]
pub fn searchable_text(entry: &CatalogEntry<'_>) -> String {
    let mut text = String::with_capacity(64);
    text.push_str(&entry.publisher.brand);
    text.push(' ');
    text.push_str(&entry.item.name);
    text.push(' ');
    text.push_str(&entry.item.slug);
    for tag in &entry.item.tags {
        text.push(' ');
        text.push_str(tag);
    }
    text
}
