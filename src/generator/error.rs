//! Error types for generators.

use std::error::Error;
use std::fmt;

/// Errors reported when a generator's producer is shut down.
///
/// Producing values never fails from the consumer's point of view: a
/// producer that dies early simply ends the sequence. The cause only
/// surfaces when the producer is reaped through `cancel`.
///
/// # Examples
///
/// ```rust
/// use tallyflow::generator::{Generator, GeneratorError};
///
/// let mut generator = Generator::map_produce(vec![1, 2, 3], |value| {
///     if value == 2 {
///         panic!("transform failed");
///     }
///     value
/// });
///
/// assert_eq!(generator.next(), Some(1));
/// assert_eq!(generator.next(), None);
/// assert_eq!(generator.cancel(), Err(GeneratorError::ProducerPanicked));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorError {
    /// The transform, predicate or source iterator panicked inside the producer.
    ProducerPanicked,

    /// The producer task was aborted by the runtime before it finished.
    ///
    /// Only reported by `AsyncGenerator`.
    TaskAborted,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProducerPanicked => {
                write!(formatter, "generator producer panicked before completion")
            }
            Self::TaskAborted => {
                write!(formatter, "generator producer task was aborted")
            }
        }
    }
}

impl Error for GeneratorError {}
