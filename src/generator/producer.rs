//! Thread-backed generator over a rendezvous channel.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use super::{GeneratorError, non_empty};

/// A single-pass pull source fed by a background producer thread.
///
/// Each constructor spawns one thread that walks the source front to back
/// and hands elements over a zero-capacity channel: the producer blocks
/// after each element until the consumer takes it, so at most one element
/// is ever in flight. Once the source is exhausted the channel closes and
/// [`next`](Iterator::next) returns `None` from then on.
///
/// # Cancellation
///
/// Stopping early never strands the producer. [`cancel`](Self::cancel)
/// raises a stop flag, closes the channel and joins the thread. Dropping
/// the generator does the same without joining. Either way the producer
/// exits after finishing at most one in-progress transform or predicate
/// call.
///
/// # Examples
///
/// ```rust
/// use tallyflow::generator::Generator;
///
/// let generator = Generator::produce(vec!["a", "b", "c"]);
/// assert_eq!(generator.collect::<Vec<_>>(), vec!["a", "b", "c"]);
///
/// let mut evens = Generator::filter_produce(1..=5, |value| value % 2 == 0);
/// assert_eq!(evens.next(), Some(2));
/// assert_eq!(evens.next(), Some(4));
/// assert_eq!(evens.next(), None);
/// assert!(evens.is_exhausted());
/// ```
pub struct Generator<V> {
    receiver: Option<Receiver<V>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl<V: Send + 'static> Generator<V> {
    /// Streams every element of `source` in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::generator::Generator;
    ///
    /// let mut generator = Generator::produce([1, 2, 3]);
    /// assert_eq!(generator.next(), Some(1));
    /// assert_eq!(generator.next(), Some(2));
    /// assert_eq!(generator.next(), Some(3));
    /// assert_eq!(generator.next(), None);
    /// assert_eq!(generator.next(), None);
    /// ```
    pub fn produce<I>(source: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: Send + 'static,
    {
        Self::spawn(source.into_iter(), Some)
    }

    /// Streams `transform(element)` for every element of `source`.
    ///
    /// An empty `source` yields an already exhausted generator and no thread
    /// is spawned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::generator::Generator;
    ///
    /// let doubled: Vec<i32> = Generator::map_produce(vec![1, 2, 3], |value| value * 2).collect();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    pub fn map_produce<I, F>(source: I, mut transform: F) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: Send + 'static,
        F: FnMut(V) -> V + Send + 'static,
    {
        match non_empty(source) {
            Some(source) => Self::spawn(source, move |value| Some(transform(value))),
            None => Self::exhausted(),
        }
    }

    /// Streams only the elements of `source` for which `predicate` holds.
    ///
    /// An empty `source` yields an already exhausted generator and no thread
    /// is spawned.
    pub fn filter_produce<I, P>(source: I, mut predicate: P) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: Send + 'static,
        P: FnMut(&V) -> bool + Send + 'static,
    {
        match non_empty(source) {
            Some(source) => Self::spawn(source, move |value| predicate(&value).then_some(value)),
            None => Self::exhausted(),
        }
    }

    fn spawn<I, F>(source: I, mut step: F) -> Self
    where
        I: Iterator<Item = V> + Send + 'static,
        F: FnMut(V) -> Option<V> + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(0);
        let stop = Arc::new(AtomicBool::new(false));
        let producer_stop = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            publish(source, &mut step, &sender, &producer_stop);
        });
        log::debug!("generator producer spawned");

        Self {
            receiver: Some(receiver),
            stop,
            handle: Some(handle),
        }
    }
}

fn publish<V, I, F>(source: I, step: &mut F, sender: &SyncSender<V>, stop: &AtomicBool)
where
    I: Iterator<Item = V>,
    F: FnMut(V) -> Option<V>,
{
    for element in source {
        if stop.load(Ordering::Acquire) {
            log::debug!("generator producer observed stop flag");
            return;
        }
        let Some(value) = step(element) else {
            continue;
        };
        if sender.send(value).is_err() {
            log::debug!("generator consumer went away; producer exiting");
            return;
        }
    }
    log::debug!("generator producer finished");
}

impl<V> Generator<V> {
    /// Creates a generator that yields nothing and owns no thread.
    pub fn exhausted() -> Self {
        Self {
            receiver: None,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Returns `true` once end-of-sequence has been observed or the
    /// generator was cancelled.
    ///
    /// A `false` result does not promise another element: the producer may
    /// still be about to close the channel.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.receiver.is_none()
    }

    /// Returns `true` if the stop flag has been raised.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Stops the producer and waits for its thread to exit.
    ///
    /// Safe to call at any point, including after full consumption, where it
    /// only reaps the thread. Subsequent calls return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::ProducerPanicked`] if the producer thread
    /// panicked, for example inside a transform or predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tallyflow::generator::Generator;
    ///
    /// let mut generator = Generator::produce(0..1_000);
    /// assert_eq!(generator.next(), Some(0));
    ///
    /// assert_eq!(generator.cancel(), Ok(()));
    /// assert!(generator.is_exhausted());
    /// assert_eq!(generator.next(), None);
    /// ```
    pub fn cancel(&mut self) -> Result<(), GeneratorError> {
        self.signal_stop();
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|_| {
            log::warn!("generator producer panicked");
            GeneratorError::ProducerPanicked
        })
    }

    fn signal_stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        // Dropping the receiver wakes a producer blocked in `send`.
        if self.receiver.take().is_some() && self.handle.is_some() {
            log::debug!("generator cancelled before exhaustion");
        }
    }
}

impl<V> Iterator for Generator<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let received = self.receiver.as_ref()?.recv().ok();
        if received.is_none() {
            self.receiver = None;
        }
        received
    }
}

impl<V> FusedIterator for Generator<V> {}

impl<V> Drop for Generator<V> {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

impl<V> fmt::Debug for Generator<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Generator")
            .field("exhausted", &self.is_exhausted())
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}
