//! # tallyflow
//!
//! Frequency counting with memoized sorted views, and lazy sequence
//! producers that stream through a rendezvous hand-off.
//!
//! ## Overview
//!
//! - **Counter**: A value → count table with a running total, plus sorted
//!   views and top-K / bottom-K selection that are computed once and reused
//!   until the table changes
//! - **Generator**: A background producer that republishes a source sequence
//!   (optionally mapped or filtered) one element at a time, and that always
//!   shuts down when its consumer stops early
//!
//! ## Feature Flags
//!
//! - `counter`: [`Counter`](counter::Counter) and its sorted views (default)
//! - `generator`: Thread-backed [`Generator`](generator::Generator) (default)
//! - `async`: Tokio-backed `AsyncGenerator` implementing `futures::Stream`
//! - `serde`: Serialization for `Counter` and `CounterItem`
//! - `fxhash` / `ahash`: Faster default hasher for `Counter`
//! - `full`: Enable all features except the hasher switches
//!
//! ## Logging
//!
//! Producer lifecycle and sorted-view rebuilds are reported through the
//! [`log`](https://docs.rs/log) facade at `debug`/`trace` level. Install any
//! `log` backend to see them.
//!
//! ## Example
//!
//! ```rust
//! use tallyflow::prelude::*;
//!
//! let counter: Counter<char> = Generator::filter_produce("hello world".chars(), |c| *c != ' ')
//!     .collect();
//!
//! assert_eq!(counter.total(), 10);
//! assert_eq!(counter.most_common_values(1), vec!['l']);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use tallyflow::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "counter")]
    pub use crate::counter::*;

    #[cfg(feature = "generator")]
    pub use crate::generator::*;
}

#[cfg(feature = "counter")]
pub mod counter;

#[cfg(feature = "generator")]
pub mod generator;
