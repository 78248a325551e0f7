//! The frequency table.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::{DefaultBuildHasher, SortedView};

/// A frequency table with memoized sorted views.
///
/// `Counter<V, S>` maps each distinct value to the number of times it was
/// tallied and keeps a running `total` of all tallies. Sorted projections
/// (see [`ascending`](Self::ascending), [`most_common`](Self::most_common))
/// are computed on first demand and reused until the table changes; every
/// mutating method discards them.
///
/// # Type Parameters
///
/// * `V` - The counted value. Sorted views additionally need `V: Ord + Clone`.
/// * `S` - The hash builder (defaults to [`DefaultBuildHasher`])
///
/// # Thread Safety
///
/// Reads take `&self` and may build the sorted view in place, so a `Counter`
/// is `Send` but not `Sync`. Share it across threads behind a `Mutex`.
///
/// # Examples
///
/// ```rust
/// use tallyflow::counter::Counter;
///
/// let mut counter = Counter::from(vec!["a", "b", "a", "c", "a"]);
/// assert_eq!(counter.total(), 5);
/// assert_eq!(counter.count("a"), 3);
/// assert_eq!(counter.count("missing"), 0);
///
/// assert_eq!(counter.most_common_values(1), vec!["a"]);
///
/// counter.remove("a");
/// assert_eq!(counter.total(), 2);
/// assert_eq!(counter.most_common_values(1), vec!["c"]);
/// ```
pub struct Counter<V, S = DefaultBuildHasher> {
    pub(super) counts: HashMap<V, usize, S>,
    pub(super) total: usize,
    pub(super) view: SortedView<V>,
}

impl<V> Counter<V, DefaultBuildHasher> {
    /// Creates an empty counter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::Counter;
    ///
    /// let counter: Counter<u8> = Counter::new();
    /// assert!(counter.is_empty());
    /// assert_eq!(counter.total(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(DefaultBuildHasher::default())
    }
}

impl<V, S> Counter<V, S> {
    /// Creates an empty counter using `hasher` to hash values.
    #[inline]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            counts: HashMap::with_hasher(hasher),
            total: 0,
            view: SortedView::new(),
        }
    }

    /// Returns the sum of all counts.
    ///
    /// This is the number of tallies, not the number of distinct values.
    #[inline]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing has been tallied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the hash builder.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.counts.hasher()
    }

    /// Iterates over `(value, count)` pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.counts.iter(),
        }
    }

    /// Returns whether the sorted view is memoized for the current contents.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::Counter;
    ///
    /// let mut counter = Counter::from([1, 1, 2]);
    /// assert!(!counter.is_view_built());
    ///
    /// let _ = counter.ascending();
    /// assert!(counter.is_view_built());
    ///
    /// counter.insert(3);
    /// assert!(!counter.is_view_built());
    /// ```
    #[inline]
    pub fn is_view_built(&self) -> bool {
        self.view.is_built()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
        self.view.invalidate();
    }
}

impl<V: Eq + Hash, S: BuildHasher> Counter<V, S> {
    /// Returns how many times `value` was tallied, or 0 if it never was.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::Counter;
    ///
    /// let counter = Counter::from(vec!["x".to_string(), "x".to_string()]);
    /// assert_eq!(counter.count("x"), 2);
    /// assert_eq!(counter.count("y"), 0);
    /// ```
    #[inline]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns `true` if `value` has a positive count.
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.contains_key(value)
    }

    /// Removes `value` entirely, subtracting its full count from the total.
    ///
    /// Returns the removed count, or `None` (leaving the table untouched) if
    /// `value` was absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::Counter;
    ///
    /// let mut counter = Counter::from([7, 7, 8]);
    /// assert_eq!(counter.remove(&7), Some(2));
    /// assert_eq!(counter.total(), 1);
    /// assert_eq!(counter.remove(&7), None);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> Option<usize>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.counts.remove(value)?;
        self.total -= removed;
        self.view.invalidate();
        Some(removed)
    }

    /// Tallies `value` once and returns its new count.
    #[inline]
    pub fn insert(&mut self, value: V) -> usize {
        self.insert_many(value, 1)
    }

    /// Tallies `value` `times` times and returns its new count.
    ///
    /// `times == 0` leaves the table untouched and never creates an entry.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the total would overflow `usize`.
    pub fn insert_many(&mut self, value: V, times: usize) -> usize {
        if times == 0 {
            return self.count(&value);
        }
        let slot = self.counts.entry(value).or_insert(0);
        *slot += times;
        self.total += times;
        self.view.invalidate();
        *slot
    }

    /// Adds every count of `other` into this table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::counter::Counter;
    ///
    /// let mut left = Counter::from(["a", "b"]);
    /// let right = Counter::from(["b", "c"]);
    /// left.merge(&right);
    ///
    /// assert_eq!(left.count("b"), 2);
    /// assert_eq!(left.total(), 4);
    /// ```
    pub fn merge<S2>(&mut self, other: &Counter<V, S2>)
    where
        V: Clone,
    {
        if other.is_empty() {
            return;
        }
        for (value, &count) in &other.counts {
            *self.counts.entry(value.clone()).or_insert(0) += count;
        }
        self.total += other.total;
        self.view.invalidate();
    }

    /// Keeps only the entries for which `predicate(value, count)` is `true`.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&V, usize) -> bool,
    {
        let mut dropped = 0;
        self.counts.retain(|value, count| {
            let keep = predicate(value, *count);
            if !keep {
                dropped += *count;
            }
            keep
        });
        if dropped > 0 {
            self.total -= dropped;
            self.view.invalidate();
        }
    }

    fn tally<I: IntoIterator<Item = V>>(&mut self, source: I) {
        let before = self.total;
        for value in source {
            *self.counts.entry(value).or_insert(0) += 1;
            self.total += 1;
        }
        if self.total != before {
            self.view.invalidate();
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<V> Default for Counter<V, DefaultBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> FromIterator<V> for Counter<V, S>
where
    V: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(source: I) -> Self {
        let mut counter = Self::with_hasher(S::default());
        counter.tally(source);
        counter
    }
}

impl<V: Eq + Hash> From<Vec<V>> for Counter<V, DefaultBuildHasher> {
    fn from(source: Vec<V>) -> Self {
        source.into_iter().collect()
    }
}

impl<V: Eq + Hash + Clone> From<&[V]> for Counter<V, DefaultBuildHasher> {
    fn from(source: &[V]) -> Self {
        source.iter().cloned().collect()
    }
}

impl<V: Eq + Hash, const N: usize> From<[V; N]> for Counter<V, DefaultBuildHasher> {
    fn from(source: [V; N]) -> Self {
        source.into_iter().collect()
    }
}

impl<V, S> Extend<V> for Counter<V, S>
where
    V: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, source: I) {
        self.tally(source);
    }
}

impl<'a, V, S> Extend<&'a V> for Counter<V, S>
where
    V: Eq + Hash + Copy + 'a,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a V>>(&mut self, source: I) {
        self.tally(source.into_iter().copied());
    }
}

// =============================================================================
// Standard Traits
// =============================================================================

impl<V: Clone, S: Clone> Clone for Counter<V, S> {
    fn clone(&self) -> Self {
        Self {
            counts: self.counts.clone(),
            total: self.total,
            view: self.view.clone(),
        }
    }
}

impl<V: Eq + Hash, S: BuildHasher> PartialEq for Counter<V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total && self.counts == other.counts
    }
}

impl<V: Eq + Hash, S: BuildHasher> Eq for Counter<V, S> {}

impl<V: fmt::Debug, S> fmt::Debug for Counter<V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Counter")
            .field("total", &self.total)
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over the `(value, count)` pairs of a [`Counter`].
///
/// Created by [`Counter::iter`]. Order is unspecified.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    inner: hash_map::Iter<'a, V, usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a V, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(value, &count)| (value, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// Owning iterator over the `(value, count)` pairs of a [`Counter`].
#[derive(Debug)]
pub struct IntoIter<V> {
    inner: hash_map::IntoIter<V, usize>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (V, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<'a, V, S> IntoIterator for &'a Counter<V, S> {
    type Item = (&'a V, usize);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, S> IntoIterator for Counter<V, S> {
    type Item = (V, usize);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.counts.into_iter(),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<V, S> serde::Serialize for Counter<V, S>
where
    V: serde::Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (value, count) in self {
            map.serialize_entry(value, &count)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct CounterVisitor<V, S> {
    marker: std::marker::PhantomData<(V, S)>,
}

#[cfg(feature = "serde")]
impl<'de, V, S> serde::de::Visitor<'de> for CounterVisitor<V, S>
where
    V: serde::Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    type Value = Counter<V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of values to counts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut counter = Counter::with_hasher(S::default());
        while let Some((value, count)) = access.next_entry::<V, usize>()? {
            // Every count is bounded by the total, so checking the total covers both.
            if counter.total.checked_add(count).is_none() {
                return Err(serde::de::Error::custom("count overflow"));
            }
            counter.insert_many(value, count);
        }
        Ok(counter)
    }
}

#[cfg(feature = "serde")]
impl<'de, V, S> serde::Deserialize<'de> for Counter<V, S>
where
    V: serde::Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(CounterVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
