//! Catalog data model
//!
//! The catalog is loaded once per session and never mutated afterwards. It owns
//! every [`Publisher`] and [`Item`]; everything else refers to them through
//! [`PublisherId`] / [`ItemId`] indices.
//!
//! # Architecture
//!
//! - `Catalog`: flat storage of publishers and items
//! - `CatalogEntry`: borrowed (publisher, item) view handed to the pure search functions
//! - `AllowedTagSet`: the fixed, ordered list of valid tag strings
//! - `loader`: reads a catalog description file into a `Catalog`

pub mod error;
pub mod loader;

pub use error::CatalogError;
pub use loader::{CatalogFile, CatalogFormat, ItemFile, PublisherFile, load_catalog, parse_catalog};

use std::collections::HashSet;
use tracing::warn;

/// Default module tags, in display order
pub const DEFAULT_TAGS: &[&str] = &[
    "Arpeggiator",
    "Attenuator",
    "Blank",
    "Chorus",
    "Clock generator",
    "Clock modulator",
    "Compressor",
    "Controller",
    "Delay",
    "Digital",
    "Distortion",
    "Drum",
    "Dual/Stereo",
    "Dynamics",
    "Effect",
    "Envelope follower",
    "Envelope generator",
    "Equalizer",
    "External",
    "Filter",
    "Flanger",
    "Function generator",
    "Granular",
    "LFO",
    "Limiter",
    "Logic",
    "Low pass gate",
    "MIDI",
    "Mixer",
    "Multiple",
    "Noise",
    "Oscillator",
    "Panning",
    "Phaser",
    "Physical modeling",
    "Polyphonic",
    "Quad",
    "Quantizer",
    "Random",
    "Recording",
    "Reverb",
    "Ring modulator",
    "Sample and hold",
    "Sampler",
    "Sequencer",
    "Slew limiter",
    "Switch",
    "Synth voice",
    "Tuner",
    "Utility",
    "Visual",
    "VCA",
    "Waveshaper",
];

/// Index of a publisher inside its [`Catalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublisherId(pub usize);

/// Index of an item inside its [`Catalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub usize);

/// A plugin publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    /// Unique slug, used in favorite keys
    pub slug: String,

    /// Display name, used for sorting
    pub name: String,

    /// Brand, used for search and the brand facet
    pub brand: String,
}

/// A browsable catalog item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Owning publisher
    pub publisher: PublisherId,

    /// Slug, unique within the publisher
    pub slug: String,

    /// Display name
    pub name: String,

    /// Optional longer description (empty if absent)
    pub description: String,

    /// Tags in stored order, each drawn from the [`AllowedTagSet`]
    pub tags: Vec<String>,
}

impl Item {
    /// Check whether the item carries `tag` (exact match)
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Ordered set of tags an item may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedTagSet {
    tags: Vec<String>,
}

impl AllowedTagSet {
    /// Build from a list, dropping duplicates while keeping first-seen order
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let tags = tags
            .into_iter()
            .map(Into::into)
            .filter(|tag: &String| seen.insert(tag.clone()))
            .collect();
        Self { tags }
    }

    /// Tags in display order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Resolve `tag` to its canonical spelling, ignoring ASCII case
    #[must_use]
    pub fn canonical(&self, tag: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.eq_ignore_ascii_case(tag.trim()))
            .map(String::as_str)
    }
}

impl Default for AllowedTagSet {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS.iter().copied())
    }
}

/// Borrowed view of one item together with its publisher
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry<'a> {
    pub id: ItemId,
    pub publisher: &'a Publisher,
    pub item: &'a Item,
}

impl CatalogEntry<'_> {
    /// Hover text: brand and name, with the description on its own line
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!("{} {}", self.publisher.brand, self.item.name);
        if !self.item.description.is_empty() {
            text.push('\n');
            text.push_str(&self.item.description);
        }
        text
    }
}

/// The full, read-only catalog for a session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    publishers: Vec<Publisher>,
    items: Vec<Item>,
    allowed_tags: AllowedTagSet,
}

impl Catalog {
    /// Create an empty catalog with the given tag set
    #[must_use]
    pub const fn new(allowed_tags: AllowedTagSet) -> Self {
        Self {
            publishers: Vec::new(),
            items: Vec::new(),
            allowed_tags,
        }
    }

    /// Add a publisher, returning its id
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptySlug` for a blank slug, or
    /// `CatalogError::DuplicatePublisher` if the slug is already taken.
    pub fn add_publisher(&mut self, publisher: Publisher) -> Result<PublisherId, CatalogError> {
        if publisher.slug.trim().is_empty() {
            return Err(CatalogError::EmptySlug(format!("publisher '{}'", publisher.name)));
        }
        if self.publishers.iter().any(|p| p.slug == publisher.slug) {
            return Err(CatalogError::DuplicatePublisher(publisher.slug));
        }

        self.publishers.push(publisher);
        Ok(PublisherId(self.publishers.len() - 1))
    }

    /// Add an item, returning its id
    ///
    /// Tags are mapped onto the allowed tag set ignoring case and stored in
    /// canonical spelling. Unknown tags are dropped and duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownPublisher` if `item.publisher` is not in
    /// this catalog, `CatalogError::EmptySlug` for a blank slug, or
    /// `CatalogError::DuplicateItem` if the publisher already has an item with
    /// the same slug.
    pub fn add_item(&mut self, mut item: Item) -> Result<ItemId, CatalogError> {
        let publisher = self
            .publishers
            .get(item.publisher.0)
            .ok_or(CatalogError::UnknownPublisher(item.publisher.0))?;

        if item.slug.trim().is_empty() {
            return Err(CatalogError::EmptySlug(format!(
                "item '{}' of publisher '{}'",
                item.name, publisher.slug
            )));
        }

        if self
            .items
            .iter()
            .any(|existing| existing.publisher == item.publisher && existing.slug == item.slug)
        {
            return Err(CatalogError::DuplicateItem {
                publisher: publisher.slug.clone(),
                item: item.slug,
            });
        }

        item.tags = canonical_tags(&self.allowed_tags, &item.tags, &item.slug);
        self.items.push(item);
        Ok(ItemId(self.items.len() - 1))
    }

    #[must_use]
    pub fn publishers(&self) -> &[Publisher] {
        &self.publishers
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub const fn allowed_tags(&self) -> &AllowedTagSet {
        &self.allowed_tags
    }

    #[must_use]
    pub fn publisher(&self, id: PublisherId) -> Option<&Publisher> {
        self.publishers.get(id.0)
    }

    /// Get the entry view for an item id
    #[must_use]
    pub fn entry(&self, id: ItemId) -> Option<CatalogEntry<'_>> {
        let item = self.items.get(id.0)?;
        let publisher = self.publishers.get(item.publisher.0)?;
        Some(CatalogEntry {
            id,
            publisher,
            item,
        })
    }

    /// Iterate all entries in catalog order
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        (0..self.items.len()).filter_map(|idx| self.entry(ItemId(idx)))
    }

    /// Look up an item by publisher slug and item slug
    #[must_use]
    pub fn find(&self, publisher_slug: &str, item_slug: &str) -> Option<CatalogEntry<'_>> {
        self.entries()
            .find(|e| e.publisher.slug == publisher_slug && e.item.slug == item_slug)
    }

    /// Distinct brands, ordered and de-duplicated ignoring case
    ///
    /// When two publishers spell a brand differently only by case, the first
    /// spelling in catalog order is kept.
    #[must_use]
    pub fn brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = Vec::new();
        for publisher in &self.publishers {
            let lower = publisher.brand.to_lowercase();
            if !brands.iter().any(|b| b.to_lowercase() == lower) {
                brands.push(publisher.brand.clone());
            }
        }
        brands.sort_by_key(|b| b.to_lowercase());
        brands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Map raw tags onto canonical allowed tags, dropping unknowns and duplicates
fn canonical_tags(allowed: &AllowedTagSet, raw: &[String], item_slug: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        match allowed.canonical(tag) {
            Some(canonical) => {
                if !tags.iter().any(|t| t == canonical) {
                    tags.push(canonical.to_string());
                }
            }
            None => warn!(item = item_slug, tag = %tag, "Dropping unknown tag"),
        }
    }
    tags
}
