//! Memoized ascending and descending views over a frequency table.
//!
//! A [`SortedView`] holds two memo cells. The ascending cell is filled on
//! first demand from a full snapshot of the table; the descending cell is
//! always derived from the ascending one. Both belong to the same
//! invalidation epoch: [`SortedView::invalidate`] clears them together, and
//! the owning table must call it on every mutation.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use super::CounterItem;

/// Lazily built, memoized sorted projections of a frequency table.
///
/// An unset cell means "not yet built for this epoch". An empty table
/// produces a built, empty view, which is distinct from the unset state.
///
/// A view does not remember which table it was built from. It must be owned
/// by exactly one table and read only against that table's map, with
/// [`invalidate`](Self::invalidate) called after every change to the map.
pub struct SortedView<V> {
    ascending: OnceCell<Vec<CounterItem<V>>>,
    descending: OnceCell<Vec<CounterItem<V>>>,
}

impl<V> SortedView<V> {
    /// Creates an unbuilt view.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ascending: OnceCell::new(),
            descending: OnceCell::new(),
        }
    }

    /// Discards both memoized lists.
    ///
    /// The next read rebuilds from the table passed to it.
    pub fn invalidate(&mut self) {
        if self.ascending.take().is_some() {
            log::trace!("sorted view invalidated");
        }
        self.descending.take();
    }

    /// Returns whether the ascending list is memoized for the current epoch.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.ascending.get().is_some()
    }

    /// Returns whether the descending list is memoized for the current epoch.
    #[inline]
    pub fn is_descending_built(&self) -> bool {
        self.descending.get().is_some()
    }
}

impl<V: Ord + Clone> SortedView<V> {
    /// Returns every `(value, count)` pair of `counts` sorted by count, then value.
    ///
    /// Built at most once per epoch.
    pub fn ascending<S>(&self, counts: &HashMap<V, usize, S>) -> &[CounterItem<V>] {
        self.ascending.get_or_init(|| {
            let mut items: Vec<CounterItem<V>> = counts
                .iter()
                .map(|(value, &count)| CounterItem::new(value.clone(), count))
                .collect();
            // Keys are unique, so the stable and unstable orders coincide.
            items.sort_unstable();
            log::trace!("sorted view rebuilt with {} entries", items.len());
            items
        })
    }

    /// Returns the exact reverse of [`ascending`](Self::ascending).
    ///
    /// Ensures the ascending list first, so both lists always share an epoch.
    pub fn descending<S>(&self, counts: &HashMap<V, usize, S>) -> &[CounterItem<V>] {
        self.descending.get_or_init(|| {
            let mut items = self.ascending(counts).to_vec();
            items.reverse();
            items
        })
    }
}

impl<V> Default for SortedView<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for SortedView<V> {
    fn clone(&self) -> Self {
        Self {
            ascending: self.ascending.clone(),
            descending: self.descending.clone(),
        }
    }
}

impl<V> fmt::Debug for SortedView<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SortedView")
            .field("ascending_built", &self.is_built())
            .field("descending_built", &self.is_descending_built())
            .finish()
    }
}
