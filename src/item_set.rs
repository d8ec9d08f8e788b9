//! Item sets: union and intersection over highlighted documents.
//!
//! Set algebra runs on two levels. Documents are matched by id; within one
//! document, highlights are matched by overlap and merged instead of being
//! kept side by side or dropped.
//!
//! ```text
//! ItemSet ──add_all / retain_all──► Item ──join / retain_all──► Highlight
//!   (by id)                           (by overlap)                (intersects, join)
//! ```

use crate::loader::Loader;
use crate::record::{DocumentRecord, HighlightRecord, RecordSource};
use crate::{Highlight, Item, Result};
use std::collections::HashMap;
use url::Url;

/// A collection of items keyed by document id.
///
/// Every item is owned by exactly one set. Union copies or moves items in,
/// it never shares them.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    items: HashMap<String, Item>,
}

/// A highlight seen together with the item that owns it.
#[derive(Debug, Clone, Copy)]
pub struct HighlightRef<'a> {
    item: &'a Item,
    highlight: &'a Highlight,
}

impl<'a> HighlightRef<'a> {
    /// The owning item.
    #[must_use]
    pub fn item(&self) -> &'a Item {
        self.item
    }

    /// The highlight itself.
    #[must_use]
    pub fn highlight(&self) -> &'a Highlight {
        self.highlight
    }

    /// Fragment-qualified locator inside the owning item's resource.
    pub fn resource_locator(&self) -> Result<Url> {
        self.item.highlight_locator(self.highlight)
    }
}

impl ItemSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one item per document record, without highlights.
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a DocumentRecord>) -> Self {
        documents.into_iter().map(Item::from_record).collect()
    }

    /// Build from documents, then insert highlights.
    ///
    /// Strict: the first unsupported highlight aborts construction.
    pub fn from_records(
        documents: &[DocumentRecord],
        highlights: &[HighlightRecord],
    ) -> Result<Self> {
        Loader::new()
            .load(documents, highlights)
            .map(|(set, _)| set)
    }

    /// Build from an external source (strict).
    pub fn from_source(source: &impl RecordSource) -> Result<Self> {
        Loader::new().load_source(source).map(|(set, _)| set)
    }

    /// Number of items.
    #[must_use]
    pub fn count_items(&self) -> usize {
        self.items.len()
    }

    /// Number of highlights over all items.
    #[must_use]
    pub fn count_highlights(&self) -> usize {
        self.items.values().map(Item::len).sum()
    }

    /// True when the set holds no item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// True when an item with this id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// All items, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All highlights of all items, flattened.
    pub fn highlights(&self) -> impl Iterator<Item = HighlightRef<'_>> {
        self.items.values().flat_map(|item| {
            item.highlights()
                .iter()
                .map(move |highlight| HighlightRef { item, highlight })
        })
    }

    /// Take the items out of the set.
    pub fn into_items(self) -> impl Iterator<Item = Item> {
        self.items.into_values()
    }

    /// Insert an item, merging its highlights into an existing item with the
    /// same id. The existing item's metadata wins.
    pub fn insert_item(&mut self, item: Item) {
        match self.items.get_mut(item.id()) {
            Some(local) => local.absorb(item),
            None => {
                self.items.insert(item.id().to_owned(), item);
            }
        }
    }

    /// Insert a highlight into the item named by its item id, creating a
    /// bare item when that document was never listed.
    pub fn insert_highlight(&mut self, highlight: Highlight) {
        self.items
            .entry(highlight.item_id().to_owned())
            .or_insert_with_key(|id| {
                log::debug!("creating unlisted item {id} for highlight");
                Item::bare(id.clone())
            })
            .add(highlight);
    }

    /// Route a raw highlight record to its item (see
    /// [`ItemSet::insert_highlight`]).
    ///
    /// Nothing is created or mutated when the record's shape is unsupported.
    pub fn add_highlight(&mut self, record: &HighlightRecord) -> Result<()> {
        let highlight = record.to_highlight(&record.item)?;
        self.insert_highlight(highlight);
        Ok(())
    }

    /// Union: items missing here are copied in, items present on both sides
    /// have their highlights merged.
    pub fn add_all(&mut self, that: &ItemSet) {
        for item in that.items.values() {
            match self.items.get_mut(item.id()) {
                Some(local) => local.join(item),
                None => {
                    self.items.insert(item.id().to_owned(), item.clone());
                }
            }
        }
    }

    /// Consuming form of [`ItemSet::add_all`].
    pub fn absorb(&mut self, that: ItemSet) {
        for item in that.into_items() {
            self.insert_item(item);
        }
    }

    /// Intersection: items whose id is absent from `that` are removed; the
    /// others keep only highlights overlapping `that`'s, merged.
    ///
    /// An item left without highlights stays in the set.
    pub fn retain_all(&mut self, that: &ItemSet) {
        self.items.retain(|id, item| match that.items.get(id) {
            Some(other) => {
                item.retain_all(other);
                log::trace!("item {id}: {} highlight(s) retained", item.len());
                true
            }
            None => {
                log::trace!("item {id}: dropped, absent from other set");
                false
            }
        });
    }

    /// Parallel [`ItemSet::add_all`]: shared items merge concurrently, new
    /// items are inserted afterwards on the calling thread.
    #[cfg(feature = "parallel")]
    pub fn par_add_all(&mut self, that: &ItemSet) {
        use rayon::prelude::*;

        self.items.par_iter_mut().for_each(|(id, local)| {
            if let Some(other) = that.items.get(id) {
                local.join(other);
            }
        });
        for (id, item) in &that.items {
            if !self.items.contains_key(id) {
                self.items.insert(id.clone(), item.clone());
            }
        }
    }

    /// Parallel [`ItemSet::retain_all`].
    #[cfg(feature = "parallel")]
    pub fn par_retain_all(&mut self, that: &ItemSet) {
        use rayon::prelude::*;

        self.items.retain(|id, _| that.items.contains_key(id));
        self.items.par_iter_mut().for_each(|(id, item)| {
            if let Some(other) = that.items.get(id) {
                item.retain_all(other);
            }
        });
    }
}

impl Extend<Item> for ItemSet {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        for item in iter {
            self.insert_item(item);
        }
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
