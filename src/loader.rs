//! Building item sets from raw records.

use crate::record::{DocumentRecord, HighlightRecord, RecordSource};
use crate::{Item, ItemSet, Result};

/// What to do with a highlight record whose coordinates are neither a span
/// nor a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePolicy {
    /// Return the error and stop loading.
    #[default]
    Abort,
    /// Log the record, count it, and go on.
    Skip,
}

/// Counts from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Document records read.
    pub documents: usize,
    /// Highlight records inserted.
    pub highlights: usize,
    /// Highlight records skipped for an unsupported shape.
    pub skipped_shapes: usize,
    /// Highlight records skipped because their document was not listed.
    pub orphaned: usize,
}

/// Loader configuration.
///
/// ```
/// use marginalia::{HighlightRecord, Loader};
///
/// let highlights = vec![
///     HighlightRecord::new("doc1", vec![0, 5]).with_text(["alpha"]),
///     HighlightRecord::new("doc1", vec![1, 2, 3]),
/// ];
/// let (set, report) = Loader::new()
///     .skip_unsupported(true)
///     .load(&[], &highlights)
///     .unwrap();
/// assert_eq!(set.count_highlights(), 1);
/// assert_eq!(report.skipped_shapes, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    shape_policy: ShapePolicy,
    create_missing_items: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Strict loader: unsupported shapes abort, unlisted documents are created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shape_policy: ShapePolicy::Abort,
            create_missing_items: true,
        }
    }

    /// Set the policy for unsupported highlight shapes.
    #[must_use]
    pub fn with_shape_policy(mut self, policy: ShapePolicy) -> Self {
        self.shape_policy = policy;
        self
    }

    /// Shorthand for [`ShapePolicy::Skip`] (`true`) or [`ShapePolicy::Abort`].
    #[must_use]
    pub fn skip_unsupported(self, skip: bool) -> Self {
        self.with_shape_policy(if skip {
            ShapePolicy::Skip
        } else {
            ShapePolicy::Abort
        })
    }

    /// Whether highlights of unlisted documents create a bare item (default)
    /// or are skipped.
    #[must_use]
    pub fn create_missing_items(mut self, create: bool) -> Self {
        self.create_missing_items = create;
        self
    }

    /// Build a set from document records, then insert highlight records.
    pub fn load(
        &self,
        documents: &[DocumentRecord],
        highlights: &[HighlightRecord],
    ) -> Result<(ItemSet, LoadReport)> {
        let mut set = ItemSet::from_documents(documents);
        let mut report = LoadReport {
            documents: documents.len(),
            ..LoadReport::default()
        };

        for record in highlights {
            if !self.create_missing_items && !set.contains(&record.item) {
                log::debug!("skipping highlight of unlisted item {}", record.item);
                report.orphaned += 1;
                continue;
            }
            if let Err(err) = record.validate() {
                if self.shape_policy == ShapePolicy::Abort {
                    return Err(err);
                }
                log::warn!("skipping highlight on item {}: {}", record.item, err);
                report.skipped_shapes += 1;
                continue;
            }
            set.add_highlight(record)?;
            report.highlights += 1;
        }

        log::debug!(
            "loaded {} item(s), {} highlight(s) ({} skipped, {} orphaned)",
            set.count_items(),
            report.highlights,
            report.skipped_shapes,
            report.orphaned
        );
        Ok((set, report))
    }

    /// Build a set from an external record source.
    pub fn load_source(&self, source: &impl RecordSource) -> Result<(ItemSet, LoadReport)> {
        self.load(&source.documents(), &source.highlights())
    }
}

/// Adds a metadata-only item per document not yet present.
impl Extend<DocumentRecord> for ItemSet {
    fn extend<I: IntoIterator<Item = DocumentRecord>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|record| Item::from_record(&record)));
    }
}
