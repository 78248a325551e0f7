//! Lazy sequence producers with cancellation.
//!
//! A generator walks a finite source on a background producer and hands
//! elements one at a time to its consumer:
//!
//! - [`Generator`]: producer thread, zero-capacity (rendezvous) channel, [`Iterator`]
//! - [`AsyncGenerator`]: producer task on Tokio, capacity-1 channel, `futures::Stream`
//!   (requires the `async` feature)
//!
//! Each flavour offers the same three constructors: `produce` (elements as
//! they are), `map_produce` (transformed) and `filter_produce` (matching a
//! predicate). Elements arrive in source order.
//!
//! # Partial Consumption
//!
//! A consumer that stops early must not leave the producer blocked on a
//! hand-off nobody will accept. Both generators raise a stop flag and close
//! the channel when cancelled or dropped, so the producer always unwinds.
//!
//! ```rust
//! use tallyflow::generator::Generator;
//!
//! let mut generator = Generator::map_produce(0..1_000_000, |value| value * 2);
//! let first_three: Vec<_> = generator.by_ref().take(3).collect();
//! assert_eq!(first_three, vec![0, 2, 4]);
//!
//! // Reaps the producer thread.
//! generator.cancel().unwrap();
//! ```

#[cfg(feature = "async")]
mod async_producer;
mod error;
mod producer;

#[cfg(feature = "async")]
pub use async_producer::AsyncGenerator;
pub use error::GeneratorError;
pub use producer::Generator;

use std::iter::Peekable;

/// Returns the source ready to iterate, or `None` if it yields nothing.
fn non_empty<I: IntoIterator>(source: I) -> Option<Peekable<I::IntoIter>> {
    let mut source = source.into_iter().peekable();
    source.peek()?;
    Some(source)
}
