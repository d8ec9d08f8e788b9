//! Concurrent population of an item set.
//!
//! Provides a unified mutex interface that uses `parking_lot::Mutex` when
//! the `fast-lock` feature is enabled, falling back to `std::sync::Mutex`
//! otherwise, and [`SharedItemSet`], which lets several producers feed
//! records into one set.

#[cfg(feature = "fast-lock")]
use parking_lot::Mutex as ParkingLotMutex;

#[cfg(not(feature = "fast-lock"))]
use std::sync::Mutex as StdMutex;

use crate::record::{DocumentRecord, HighlightRecord};
use crate::{Item, ItemSet, Result};

/// Mutex type that conditionally uses parking_lot or std::sync::Mutex.
#[cfg(feature = "fast-lock")]
pub type Mutex<T> = ParkingLotMutex<T>;

/// Mutex type that conditionally uses parking_lot or std::sync::Mutex.
#[cfg(not(feature = "fast-lock"))]
pub type Mutex<T> = StdMutex<T>;

/// Guard returned by [`lock`].
#[cfg(feature = "fast-lock")]
pub type MutexGuard<'a, T> = parking_lot::MutexGuard<'a, T>;

/// Guard returned by [`lock`].
#[cfg(not(feature = "fast-lock"))]
pub type MutexGuard<'a, T> = std::sync::MutexGuard<'a, T>;

/// Lock a mutex and return the guard, handling poisoning gracefully.
///
/// For `parking_lot::Mutex`, this is just `mutex.lock()`.
/// For `std::sync::Mutex`, this handles poisoning by recovering the guard.
///
/// ```rust
/// use marginalia::sync::{lock, Mutex};
///
/// let data = Mutex::new(42);
/// *lock(&data) = 100;
/// assert_eq!(*lock(&data), 100);
/// ```
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    #[cfg(feature = "fast-lock")]
    {
        mutex.lock()
    }
    #[cfg(not(feature = "fast-lock"))]
    {
        mutex.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// An item set that parallel producers can populate through `&self`.
///
/// Records are converted before the lock is taken. Each insertion, merge
/// included, runs entirely under the lock, so no insertion ever observes
/// another thread's half-applied change to the same item.
///
/// ```rust
/// use marginalia::sync::SharedItemSet;
/// use marginalia::HighlightRecord;
/// use std::sync::Arc;
/// use std::thread;
///
/// let shared = Arc::new(SharedItemSet::new());
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || {
///             let record = HighlightRecord::new("doc", vec![i * 3, i * 3 + 4]);
///             shared.add_highlight(&record).unwrap();
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// let set = Arc::try_unwrap(shared).unwrap().into_inner();
/// assert_eq!(set.count_highlights(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SharedItemSet {
    inner: Mutex<ItemSet>,
}

impl SharedItemSet {
    /// Create an empty shared set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing set.
    #[must_use]
    pub fn from_set(set: ItemSet) -> Self {
        Self {
            inner: Mutex::new(set),
        }
    }

    /// Register a document, merging into an item already present.
    pub fn add_document(&self, record: &DocumentRecord) {
        let item = Item::from_record(record);
        lock(&self.inner).insert_item(item);
    }

    /// Insert an item, merging into one already present.
    pub fn insert_item(&self, item: Item) {
        lock(&self.inner).insert_item(item);
    }

    /// Convert and insert a highlight record.
    ///
    /// Fails without touching the set when the record's shape is unsupported.
    pub fn add_highlight(&self, record: &HighlightRecord) -> Result<()> {
        let highlight = record.to_highlight(&record.item)?;
        lock(&self.inner).insert_highlight(highlight);
        Ok(())
    }

    /// Union another set into this one.
    pub fn add_all(&self, that: &ItemSet) {
        lock(&self.inner).add_all(that);
    }

    /// Counts as `(items, highlights)` at this instant.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        let set = lock(&self.inner);
        (set.count_items(), set.count_highlights())
    }

    /// Copy of the current content.
    #[must_use]
    pub fn snapshot(&self) -> ItemSet {
        lock(&self.inner).clone()
    }

    /// Take the set out.
    #[must_use]
    pub fn into_inner(self) -> ItemSet {
        #[cfg(feature = "fast-lock")]
        {
            self.inner.into_inner()
        }
        #[cfg(not(feature = "fast-lock"))]
        {
            self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
        }
    }
}

impl From<ItemSet> for SharedItemSet {
    fn from(set: ItemSet) -> Self {
        Self::from_set(set)
    }
}
