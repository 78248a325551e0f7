//! Frequency counting with memoized sorted views.
//!
//! This module provides:
//!
//! - [`Counter`]: A table from value to occurrence count with a running total
//! - [`CounterItem`]: One `(value, count)` entry of a sorted view
//!
//! # Ordering
//!
//! Sorted views order entries by count ascending and break ties by value
//! ascending. The most common entry of [`Counter::most_common`] is therefore
//! the last element, and among equally frequent values the greatest one wins.
//!
//! # Memoization
//!
//! The first sorted query on a `Counter` snapshots and sorts its contents.
//! Subsequent queries reuse that snapshot until a mutating method
//! (`remove`, `insert`, `insert_many`, `merge`, `retain`, `clear`, `extend`)
//! discards it.
//!
//! # Examples
//!
//! ```rust
//! use tallyflow::counter::Counter;
//!
//! let words = "the cat and the hat and the bat".split(' ');
//! let counter: Counter<&str> = words.collect();
//!
//! assert_eq!(counter.total(), 8);
//! assert_eq!(counter.count("the"), 3);
//! assert_eq!(counter.most_common_values(2), vec!["and", "the"]);
//! assert_eq!(counter.least_common_values(1), vec!["bat"]);
//! ```
//!
//! # Hashing
//!
//! [`DefaultBuildHasher`] is `std`'s `RandomState` unless the `fxhash` or
//! `ahash` feature selects a faster hasher. `fxhash` wins when both are on.

mod item;
mod selector;
mod sorted_view;
mod table;

pub use item::CounterItem;
pub use table::{Counter, IntoIter, Iter};

use sorted_view::SortedView;

/// The hash builder used by [`Counter::new`].
#[cfg(feature = "fxhash")]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// The hash builder used by [`Counter::new`].
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultBuildHasher = ahash::RandomState;

/// The hash builder used by [`Counter::new`].
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::collections::hash_map::RandomState;
