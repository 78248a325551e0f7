//! A single `(value, count)` entry of a sorted view.

use std::cmp::Ordering;
use std::fmt;

/// One entry of a [`Counter`](super::Counter) sorted view.
///
/// Items order by `count` first and by `value` second, both ascending.
/// This is the order used by [`Counter::ascending`](super::Counter::ascending).
///
/// # Examples
///
/// ```rust
/// use tallyflow::counter::CounterItem;
///
/// let rare = CounterItem::new("z", 1);
/// let frequent = CounterItem::new("a", 3);
/// assert!(rare < frequent);
///
/// // Equal counts fall back to the value.
/// assert!(CounterItem::new("a", 3) < CounterItem::new("b", 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterItem<V> {
    /// The counted value.
    pub value: V,
    /// How many times `value` was tallied.
    pub count: usize,
}

impl<V> CounterItem<V> {
    /// Creates a new item.
    #[inline]
    pub const fn new(value: V, count: usize) -> Self {
        Self { value, count }
    }

    /// Consumes the item, returning the value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: Ord> Ord for CounterItem<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl<V: Ord> PartialOrd for CounterItem<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> From<(V, usize)> for CounterItem<V> {
    fn from((value, count): (V, usize)) -> Self {
        Self::new(value, count)
    }
}

impl<V: fmt::Display> fmt::Display for CounterItem<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.value, self.count)
    }
}
