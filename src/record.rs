//! Raw records consumed from a document/annotation source.
//!
//! The core never fetches anything. A [`RecordSource`] hands over plain
//! document and highlight records, which are turned into items and
//! highlights.

use crate::{Error, Highlight, Locator, Rect, Result};
use serde::{Deserialize, Serialize};

/// A document as listed by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Document locator.
    #[serde(default)]
    pub resource: Locator,
    /// Thumbnail locator.
    #[serde(default)]
    pub thumbnail: Locator,
}

impl DocumentRecord {
    /// Create a document record.
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
        }
    }
}

/// A highlight as stored by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    /// Id of the document the highlight belongs to.
    #[serde(alias = "parentItemId")]
    pub item: String,
    /// `[begin, end]` for a text span, `[x1, y1, x2, y2]` for a picture region.
    pub coordinates: Vec<i64>,
    /// Highlighted text, for text spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
}

impl HighlightRecord {
    /// Create a record without text.
    pub fn new(item: impl Into<String>, coordinates: Vec<i64>) -> Self {
        Self {
            item: item.into(),
            coordinates,
            text: None,
        }
    }

    /// Attach highlighted text.
    #[must_use]
    pub fn with_text(mut self, text: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.text = Some(text.into_iter().map(Into::into).collect());
        self
    }

    /// Check the coordinate count without building anything.
    pub fn validate(&self) -> Result<()> {
        match self.coordinates.len() {
            2 | 4 => Ok(()),
            n => Err(Error::unsupported_shape(n)),
        }
    }

    /// Build the highlight this record describes, owned by `item_id`.
    ///
    /// Two coordinates make a text span, four make a picture region from two
    /// opposite corners. Text is ignored for regions.
    pub fn to_highlight(&self, item_id: &str) -> Result<Highlight> {
        match *self.coordinates.as_slice() {
            [begin, end] => Ok(Highlight::span(
                item_id,
                begin,
                end,
                self.text.iter().flatten().cloned(),
            )),
            [x1, y1, x2, y2] => Ok(Highlight::region(
                item_id,
                Rect::from_corners(x1, y1, x2, y2),
            )),
            _ => Err(Error::unsupported_shape(self.coordinates.len())),
        }
    }
}

/// An external collaborator providing records.
///
/// A corpus lists documents only; a topic lists documents together with
/// the highlights filed under it.
pub trait RecordSource {
    /// Documents to build items from.
    fn documents(&self) -> Vec<DocumentRecord>;

    /// Highlights to insert into those items.
    fn highlights(&self) -> Vec<HighlightRecord> {
        Vec::new()
    }
}

/// An in-memory batch of records, e.g. deserialized from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    /// Document records.
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    /// Highlight records.
    #[serde(default)]
    pub highlights: Vec<HighlightRecord>,
}

impl RecordBatch {
    /// Parse a batch from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl RecordSource for RecordBatch {
    fn documents(&self) -> Vec<DocumentRecord> {
        self.documents.clone()
    }

    fn highlights(&self) -> Vec<HighlightRecord> {
        self.highlights.clone()
    }
}
