//! Top-K / bottom-K selection over the memoized sorted view.
//!
//! All selections borrow from the ascending list, so repeated queries on an
//! unchanged table sort only once. An `n` of zero, or one larger than the
//! number of distinct values, selects the whole ascending list.

use super::{Counter, CounterItem};

fn values_of<V: Clone>(items: &[CounterItem<V>]) -> Vec<V> {
    items.iter().map(|item| item.value.clone()).collect()
}

impl<V: Ord + Clone, S> Counter<V, S> {
    /// Returns every entry sorted by count ascending, ties by value ascending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::{Counter, CounterItem};
    ///
    /// let counter = Counter::from(["b", "a", "b"]);
    /// assert_eq!(
    ///     counter.ascending(),
    ///     &[CounterItem::new("a", 1), CounterItem::new("b", 2)]
    /// );
    /// ```
    pub fn ascending(&self) -> &[CounterItem<V>] {
        self.view.ascending(&self.counts)
    }

    /// Returns the exact reverse of [`ascending`](Self::ascending).
    pub fn descending(&self) -> &[CounterItem<V>] {
        self.view.descending(&self.counts)
    }

    /// Values of [`ascending`](Self::ascending), in the same order.
    pub fn ascending_values(&self) -> Vec<V> {
        values_of(self.ascending())
    }

    /// Values of [`descending`](Self::descending), in the same order.
    pub fn descending_values(&self) -> Vec<V> {
        values_of(self.descending())
    }

    /// Returns the `n` highest-count entries, still in ascending order.
    ///
    /// The most common entry is the **last** element. Among entries sharing
    /// the highest count, the greatest value ranks highest. Use
    /// [`descending`](Self::descending) for a largest-first ordering.
    ///
    /// If `n` is 0 or exceeds [`len`](Self::len), the whole ascending list is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::{Counter, CounterItem};
    ///
    /// let counter = Counter::from([1, 2, 2, 3, 3, 3]);
    /// assert_eq!(
    ///     counter.most_common(2),
    ///     &[CounterItem::new(2, 2), CounterItem::new(3, 3)]
    /// );
    /// assert_eq!(counter.most_common(0).len(), 3);
    /// assert_eq!(counter.most_common(10).len(), 3);
    /// ```
    pub fn most_common(&self, n: usize) -> &[CounterItem<V>] {
        let ascending = self.ascending();
        if n == 0 || n > ascending.len() {
            return ascending;
        }
        &ascending[ascending.len() - n..]
    }

    /// Returns the `n` lowest-count entries in ascending order.
    ///
    /// Out-of-range `n` behaves as in [`most_common`](Self::most_common).
    pub fn least_common(&self, n: usize) -> &[CounterItem<V>] {
        let ascending = self.ascending();
        if n == 0 || n > ascending.len() {
            return ascending;
        }
        &ascending[..n]
    }

    /// Values of [`most_common`](Self::most_common), in the same order.
    pub fn most_common_values(&self, n: usize) -> Vec<V> {
        values_of(self.most_common(n))
    }

    /// Values of [`least_common`](Self::least_common), in the same order.
    pub fn least_common_values(&self, n: usize) -> Vec<V> {
        values_of(self.least_common(n))
    }
}
