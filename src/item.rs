//! Items: one document and its pairwise non-overlapping highlights.

use crate::record::{DocumentRecord, HighlightRecord};
use crate::{Highlight, Locator, Result};
use std::hash::{Hash, Hasher};
use url::Url;

/// One document with its highlights.
///
/// No two highlights held by an item intersect. Overlaps are resolved at
/// insertion time by merging, never left latent.
///
/// Identity is the id alone: two items with the same id are equal whatever
/// their metadata or highlights.
#[derive(Debug, Clone)]
pub struct Item {
    id: String,
    name: String,
    resource: Locator,
    thumbnail: Locator,
    highlights: Vec<Highlight>,
}

impl Item {
    /// Create an item without highlights.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        resource: impl Into<Locator>,
        thumbnail: impl Into<Locator>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resource: resource.into(),
            thumbnail: thumbnail.into(),
            highlights: Vec::new(),
        }
    }

    /// Create an item carrying only an id, for highlights whose document
    /// was not listed.
    pub fn bare(id: impl Into<String>) -> Self {
        Self::new(id, String::new(), Locator::default(), Locator::default())
    }

    /// Create an item from a document record (metadata only).
    #[must_use]
    pub fn from_record(record: &DocumentRecord) -> Self {
        Self::new(
            record.id.clone(),
            record.name.clone(),
            record.resource.clone(),
            record.thumbnail.clone(),
        )
    }

    /// Document id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Document locator.
    #[must_use]
    pub fn resource(&self) -> &Locator {
        &self.resource
    }

    /// Thumbnail locator.
    #[must_use]
    pub fn thumbnail(&self) -> &Locator {
        &self.thumbnail
    }

    /// Number of highlights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    /// True when the item holds no highlight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// Highlights in insertion order.
    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Fragment-qualified locator of one of this item's highlights.
    pub fn highlight_locator(&self, highlight: &Highlight) -> Result<Url> {
        highlight.resource_locator(&self.resource)
    }

    /// Insert a highlight, merging every highlight it overlaps into it.
    ///
    /// Absorbing one highlight can widen the incoming one onto others it did
    /// not touch before, so scanning repeats until nothing intersects. Each
    /// scan collects first and mutates after.
    ///
    /// A highlight carrying another item's id is re-parented to this item.
    pub fn add(&mut self, mut highlight: Highlight) {
        if highlight.item_id() != self.id {
            log::debug!(
                "re-parenting highlight from item {} to {}",
                highlight.item_id(),
                self.id
            );
            highlight.set_item_id(&self.id);
        }

        let mut absorbed = 0;
        loop {
            let (overlapping, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.highlights)
                .into_iter()
                .partition(|old| old.intersects(&highlight));
            self.highlights = rest;
            if overlapping.is_empty() {
                break;
            }
            absorbed += overlapping.len();
            for old in &overlapping {
                highlight.join(old);
            }
        }

        if absorbed > 0 {
            log::debug!("item {}: merged {} highlight(s) on insert", self.id, absorbed);
        }
        self.highlights.push(highlight);
    }

    /// Convert a raw highlight record and insert it.
    ///
    /// Fails without touching the item when the record's shape is unsupported.
    pub fn add_record(&mut self, record: &HighlightRecord) -> Result<()> {
        let highlight = record.to_highlight(&self.id)?;
        self.add(highlight);
        Ok(())
    }

    /// Union at the highlight level: insert a copy of every highlight of `that`.
    pub fn join(&mut self, that: &Item) {
        for highlight in &that.highlights {
            self.add(highlight.clone());
        }
    }

    /// Consuming form of [`Item::join`].
    pub fn absorb(&mut self, that: Item) {
        for highlight in that.highlights {
            self.add(highlight);
        }
    }

    /// Intersection at the highlight level.
    ///
    /// Keeps only highlights overlapping at least one of `that`'s highlights,
    /// each widened to cover every counterpart it overlaps (directly, or
    /// through a counterpart absorbed earlier). Highlights without a
    /// counterpart are dropped. Survivors are re-inserted with [`Item::add`],
    /// so survivors widened onto each other merge.
    pub fn retain_all(&mut self, that: &Item) {
        let held = std::mem::take(&mut self.highlights);
        for mut highlight in held {
            let mut pending: Vec<&Highlight> = that.highlights.iter().collect();
            let mut found = false;
            loop {
                let (hits, rest): (Vec<_>, Vec<_>) = pending
                    .into_iter()
                    .partition(|counterpart| counterpart.intersects(&highlight));
                pending = rest;
                if hits.is_empty() {
                    break;
                }
                found = true;
                for counterpart in hits {
                    highlight.join(counterpart);
                }
            }
            if found {
                self.add(highlight);
            }
        }
    }

    /// True when no two highlights intersect and every highlight refers to
    /// this item.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let parented = self.highlights.iter().all(|h| h.item_id() == self.id);
        let disjoint = self.highlights.iter().enumerate().all(|(i, a)| {
            self.highlights[i + 1..].iter().all(|b| !a.intersects(b))
        });
        parented && disjoint
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;

    fn doc() -> Item {
        Item::new("doc1", "Doc one", "http://example.org/doc1", "")
    }

    fn span(begin: i64, end: i64, text: &str) -> Highlight {
        Highlight::span("doc1", begin, end, [text])
    }

    fn extents(item: &Item) -> Vec<(i64, i64)> {
        let mut out: Vec<_> = item
            .highlights()
            .iter()
            .filter_map(Highlight::as_span)
            .map(|s| (s.begin(), s.end()))
            .collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn add_keeps_disjoint_highlights_apart() {
        let mut item = doc();
        item.add(span(0, 5, "a"));
        item.add(span(5, 10, "b"));
        item.add(span(20, 30, "c"));
        assert_eq!(item.len(), 3);
        assert!(item.is_valid());
    }

    #[test]
    fn add_chains_through_a_bridging_highlight() {
        let mut item = doc();
        item.add(span(0, 5, "a"));
        item.add(span(10, 15, "b"));
        item.add(span(4, 11, "c"));
        assert_eq!(extents(&item), vec![(0, 15)]);
        let texts = item.highlights()[0].as_span().unwrap().texts().to_vec();
        assert_eq!(texts.len(), 3);
        assert!(item.is_valid());
    }

    #[test]
    fn add_rescans_after_widening() {
        let mut item = doc();
        item.add(Highlight::region("doc1", Rect::new(0, 0, 10, 10)));
        item.add(Highlight::region("doc1", Rect::new(12, 0, 3, 3)));
        assert_eq!(item.len(), 2);

        // The incoming region misses (12,0,3,3) until it absorbs (0,0,10,10).
        item.add(Highlight::region("doc1", Rect::new(5, 5, 10, 10)));
        assert_eq!(item.len(), 1);
        let region = item.highlights()[0].as_region().unwrap();
        assert_eq!(region.rect(), Rect::new(0, 0, 15, 15));
    }

    #[test]
    fn add_reparents_foreign_highlights() {
        let mut item = doc();
        item.add(Highlight::span("elsewhere", 0, 4, ["x"]));
        item.add(span(2, 6, "y"));
        assert_eq!(item.len(), 1);
        assert_eq!(item.highlights()[0].item_id(), "doc1");
    }

    #[test]
    fn spans_and_regions_coexist() {
        let mut item = doc();
        item.add(span(0, 10, "a"));
        item.add(Highlight::region("doc1", Rect::new(0, 0, 10, 10)));
        item.add(Highlight::region("doc1", Rect::new(5, 5, 10, 10)));
        assert_eq!(item.len(), 2);
        let region = item
            .highlights()
            .iter()
            .find_map(Highlight::as_region)
            .unwrap();
        assert_eq!(region.rect(), Rect::new(0, 0, 15, 15));
    }

    #[test]
    fn join_merges_overlaps_across_items() {
        let mut a = doc();
        a.add(span(0, 5, "alpha"));
        let mut b = doc();
        b.add(span(4, 9, "beta"));
        b.add(span(40, 50, "gamma"));

        a.join(&b);
        assert_eq!(extents(&a), vec![(0, 9), (40, 50)]);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn retain_all_keeps_only_overlapping_and_widens() {
        let mut a = doc();
        a.add(span(0, 5, "alpha"));
        a.add(span(20, 25, "lonely"));
        let mut b = doc();
        b.add(span(4, 9, "beta"));

        a.retain_all(&b);
        assert_eq!(extents(&a), vec![(0, 9)]);
    }

    #[test]
    fn retain_all_accumulates_multiple_counterparts() {
        let mut a = doc();
        a.add(span(0, 20, "wide"));
        let mut b = doc();
        b.add(span(2, 4, "x"));
        b.add(span(18, 30, "y"));
        b.add(span(50, 60, "z"));

        a.retain_all(&b);
        assert_eq!(extents(&a), vec![(0, 30)]);
        let texts = a.highlights()[0].as_span().unwrap().texts().to_vec();
        assert_eq!(texts, vec!["wide", "x", "y"]);
    }

    #[test]
    fn retain_all_rescans_after_widening() {
        let mut a = doc();
        a.add(Highlight::region("doc1", Rect::new(5, 5, 10, 10)));
        let mut b = doc();
        b.add(Highlight::region("doc1", Rect::new(0, 0, 10, 10)));
        b.add(Highlight::region("doc1", Rect::new(12, 0, 3, 3)));

        a.retain_all(&b);
        assert_eq!(a.len(), 1);
        let region = a.highlights()[0].as_region().unwrap();
        assert_eq!(region.rect(), Rect::new(0, 0, 15, 15));
    }

    #[test]
    fn retain_all_merges_survivors_widened_onto_each_other() {
        let mut a = doc();
        a.add(span(0, 5, "a"));
        a.add(span(10, 15, "b"));
        let mut b = doc();
        b.add(span(3, 12, "bridge"));

        a.retain_all(&b);
        assert_eq!(extents(&a), vec![(0, 15)]);
        assert!(a.is_valid());
    }

    #[test]
    fn retain_all_against_empty_item_clears() {
        let mut a = doc();
        a.add(span(0, 5, "a"));
        a.retain_all(&doc());
        assert!(a.is_empty());
    }

    #[test]
    fn identity_is_the_id() {
        let a = Item::new("same", "A", "http://a", "");
        let mut b = Item::new("same", "B", "http://b", "http://thumb");
        b.add(Highlight::span("same", 0, 1, ["x"]));
        assert_eq!(a, b);
        assert_ne!(a, Item::bare("other"));
    }

    #[test]
    fn add_record_rejects_bad_shapes_without_mutation() {
        let mut item = doc();
        item.add(span(0, 5, "a"));
        let record = HighlightRecord::new("doc1", vec![1, 2, 3]);
        assert!(item.add_record(&record).is_err());
        assert_eq!(extents(&item), vec![(0, 5)]);
    }

    #[test]
    fn highlight_locator_uses_item_resource() {
        let mut item = doc();
        item.add(span(1, 4, "a"));
        let url = item.highlight_locator(&item.highlights()[0]).unwrap();
        assert_eq!(url.as_str(), "http://example.org/doc1#char=1,4");
    }
}
