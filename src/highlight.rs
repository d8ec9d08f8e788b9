//! Highlights: localized annotations on a single item.
//!
//! Two geometries share one contract:
//!
//! | Variant | Extent | Payload | Fragment |
//! |---------|--------|---------|----------|
//! | [`SpanHighlight`] | half-open `[begin, end)` over character offsets | text snippets | `char=b,e` (RFC 5147) |
//! | [`RegionHighlight`] | axis-aligned [`Rect`] | none | `xywh=x,y,w,h` (Media Fragments) |
//!
//! Overlap replaces equality: two highlights intersect only when they are
//! the same variant, belong to the same item, and their extents overlap.
//! Anything else is a non-overlap, never an error.

use crate::{Locator, Result};
use url::Url;

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned rectangle with non-negative width and height.
///
/// Coordinates come from untrusted records, so edge arithmetic saturates at
/// the `i64` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

impl Rect {
    /// Create a rectangle. Negative extents are flipped so that the same
    /// area is covered with a non-negative width and height.
    #[must_use]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        let (x, width) = if width < 0 {
            (x.saturating_add(width), width.saturating_neg())
        } else {
            (x, width)
        };
        let (y, height) = if height < 0 {
            (y.saturating_add(height), height.saturating_neg())
        } else {
            (y, height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> i64 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> i64 {
        self.y
    }

    /// Width, never negative.
    #[must_use]
    pub const fn width(&self) -> i64 {
        self.width
    }

    /// Height, never negative.
    #[must_use]
    pub const fn height(&self) -> i64 {
        self.height
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Positive-area overlap test.
    ///
    /// Rectangles sharing only an edge or a corner do not intersect, and an
    /// empty rectangle intersects nothing.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

// =============================================================================
// Variants
// =============================================================================

/// A text span `[begin, end)` with the snippets it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanHighlight {
    item_id: String,
    begin: i64,
    end: i64,
    texts: Vec<String>,
}

impl SpanHighlight {
    /// Create a span highlight. Reversed bounds are swapped.
    pub fn new(
        item_id: impl Into<String>,
        begin: i64,
        end: i64,
        texts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut span = Self {
            item_id: item_id.into(),
            begin: begin.min(end),
            end: begin.max(end),
            texts: Vec::new(),
        };
        span.absorb_texts(texts.into_iter().map(Into::into));
        span
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn begin(&self) -> i64 {
        self.begin
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Accumulated snippets without duplicates, ordered by where the merged
    /// spans started.
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Number of offsets covered.
    #[must_use]
    pub const fn len(&self) -> i64 {
        self.end.saturating_sub(self.begin)
    }

    /// True for an empty range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    fn overlaps(&self, that: &Self) -> bool {
        (self.begin, self.end) == (that.begin, that.end)
            || (self.begin < that.end && that.begin < self.end)
    }

    // Texts of whichever span starts first come first.
    fn join(&mut self, that: &Self) {
        if that.begin < self.begin {
            let ours = std::mem::replace(&mut self.texts, that.texts.clone());
            self.absorb_texts(ours.into_iter());
        } else {
            self.absorb_texts(that.texts.iter().cloned());
        }
        self.begin = self.begin.min(that.begin);
        self.end = self.end.max(that.end);
    }

    fn absorb_texts(&mut self, texts: impl Iterator<Item = String>) {
        for text in texts {
            if !self.texts.contains(&text) {
                self.texts.push(text);
            }
        }
    }
}

/// A rectangular picture region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHighlight {
    item_id: String,
    rect: Rect,
}

impl RegionHighlight {
    /// Create a region highlight.
    pub fn new(item_id: impl Into<String>, rect: Rect) -> Self {
        Self {
            item_id: item_id.into(),
            rect,
        }
    }

    /// The highlighted rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

// =============================================================================
// Highlight
// =============================================================================

/// A localized annotation on one item.
///
/// The highlight refers to its item by id only; the item owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    /// One-dimensional text range.
    Span(SpanHighlight),
    /// Two-dimensional picture rectangle.
    Region(RegionHighlight),
}

impl Highlight {
    /// Create a text span highlight.
    pub fn span(
        item_id: impl Into<String>,
        begin: i64,
        end: i64,
        texts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Span(SpanHighlight::new(item_id, begin, end, texts))
    }

    /// Create a picture region highlight.
    pub fn region(item_id: impl Into<String>, rect: Rect) -> Self {
        Self::Region(RegionHighlight::new(item_id, rect))
    }

    /// Id of the item this highlight belongs to.
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::Span(s) => &s.item_id,
            Self::Region(r) => &r.item_id,
        }
    }

    pub(crate) fn set_item_id(&mut self, item_id: &str) {
        let slot = match self {
            Self::Span(s) => &mut s.item_id,
            Self::Region(r) => &mut r.item_id,
        };
        item_id.clone_into(slot);
    }

    /// The span variant, if this is one.
    #[must_use]
    pub fn as_span(&self) -> Option<&SpanHighlight> {
        match self {
            Self::Span(s) => Some(s),
            Self::Region(_) => None,
        }
    }

    /// The region variant, if this is one.
    #[must_use]
    pub fn as_region(&self) -> Option<&RegionHighlight> {
        match self {
            Self::Region(r) => Some(r),
            Self::Span(_) => None,
        }
    }

    /// Overlap test. Symmetric.
    ///
    /// Spans are half-open: `[0,10)` and `[10,20)` touch but do not intersect.
    /// Identical extents always intersect, empty ones included.
    /// Different variants or different items never intersect.
    #[must_use]
    pub fn intersects(&self, that: &Self) -> bool {
        if self.item_id() != that.item_id() {
            return false;
        }
        match (self, that) {
            (Self::Span(a), Self::Span(b)) => a.overlaps(b),
            (Self::Region(a), Self::Region(b)) => a.rect == b.rect || a.rect.intersects(&b.rect),
            _ => false,
        }
    }

    /// Absorb `that`'s extent and payload.
    ///
    /// Spans widen to cover both ranges and take the union of their texts;
    /// regions become the bounding rectangle of both. Joining a different
    /// variant leaves `self` unchanged.
    pub fn join(&mut self, that: &Self) {
        match (self, that) {
            (Self::Span(a), Self::Span(b)) => a.join(b),
            (Self::Region(a), Self::Region(b)) => a.rect = a.rect.union(&b.rect),
            (this, _) => {
                log::debug!(
                    "ignoring join of mismatched highlight variants on item {}",
                    this.item_id()
                );
            }
        }
    }

    /// Value form of [`Highlight::join`].
    #[must_use]
    pub fn joined(mut self, that: &Self) -> Self {
        self.join(that);
        self
    }

    /// Positional fragment describing where the highlight lies.
    #[must_use]
    pub fn fragment(&self) -> String {
        match self {
            Self::Span(s) => format!("char={},{}", s.begin, s.end),
            Self::Region(r) => format!(
                "xywh={},{},{},{}",
                r.rect.x, r.rect.y, r.rect.width, r.rect.height
            ),
        }
    }

    /// Derive the fragment-qualified locator from the parent's resource.
    ///
    /// Fails when the parent's base locator cannot be parsed.
    pub fn resource_locator(&self, base: &Locator) -> Result<Url> {
        base.with_fragment(&self.fragment())
    }
}
