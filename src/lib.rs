//! # marginalia
//!
//! Union and intersection over collections of highlighted documents.
//!
//! Ordinary set operations assume element equality. Here two highlights are
//! "the same" when they overlap, and overlapping highlights are merged rather
//! than kept twice or dropped:
//!
//! - **Union** ([`ItemSet::add_all`]) coalesces every transitively
//!   overlapping highlight into one, widening its extent and accumulating
//!   its text.
//! - **Intersection** ([`ItemSet::retain_all`]) keeps only highlights with an
//!   overlapping counterpart, widened over those counterparts.
//!
//! Both work on two levels: documents ([`Item`]) are matched by id,
//! highlights ([`Highlight`]) by overlap.
//!
//! | Highlight | Extent | Locator fragment |
//! |-----------|--------|------------------|
//! | [`Highlight::Span`] | `[begin, end)` over text offsets | `#char=b,e` |
//! | [`Highlight::Region`] | axis-aligned [`Rect`] on a picture | `#xywh=x,y,w,h` |
//!
//! ## Quick Start
//!
//! ```rust
//! use marginalia::{DocumentRecord, HighlightRecord, ItemSet};
//!
//! let docs = vec![DocumentRecord::new("doc1", "Doc", "http://example.org/doc1", "")];
//! let mut x = ItemSet::from_records(
//!     &docs,
//!     &[HighlightRecord::new("doc1", vec![0, 5]).with_text(["alpha"])],
//! )?;
//! let y = ItemSet::from_records(
//!     &docs,
//!     &[HighlightRecord::new("doc1", vec![4, 9]).with_text(["beta"])],
//! )?;
//!
//! x.add_all(&y);
//! let merged = &x.get("doc1").unwrap().highlights()[0];
//! let span = merged.as_span().unwrap();
//! assert_eq!((span.begin(), span.end()), (0, 9));
//! assert_eq!(span.texts(), ["alpha", "beta"]);
//! # Ok::<(), marginalia::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: per-document parallel union/intersection with rayon
//! - `fast-lock`: `parking_lot` mutex behind [`sync::SharedItemSet`]

#![warn(missing_docs)]

pub mod error;
pub mod highlight;
pub mod item;
pub mod item_set;
pub mod loader;
pub mod locator;
pub mod record;
mod render;
pub mod sync;

pub use error::{Error, Result};
pub use highlight::{Highlight, Rect, RegionHighlight, SpanHighlight};
pub use item::Item;
pub use item_set::{HighlightRef, ItemSet};
pub use loader::{LoadReport, Loader, ShapePolicy};
pub use locator::Locator;
pub use record::{DocumentRecord, HighlightRecord, RecordBatch, RecordSource};
pub use sync::SharedItemSet;
