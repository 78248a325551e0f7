//! Task-backed generator for async consumers.
//!
//! [`AsyncGenerator`] mirrors [`Generator`](super::Generator) on a Tokio
//! runtime: the producer is a spawned task, the hand-off is a bounded
//! `tokio::sync::mpsc` channel of capacity 1, and consumption happens through
//! [`futures::Stream`].

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use futures::stream::FusedStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{GeneratorError, non_empty};

/// Rejected elements scanned between two voluntary yields of the producer task.
const SKIP_YIELD_INTERVAL: usize = 64;

/// A single-pass async pull source fed by a background Tokio task.
///
/// The channel holds at most one element; the producer suspends on `send`
/// until the consumer makes room. A stop flag raised by
/// [`cancel`](Self::cancel) or by dropping the generator is checked before
/// every element, and the channel is closed at the same time so a suspended
/// `send` fails immediately.
///
/// # Panics
///
/// The constructors that spawn a task panic when called outside a Tokio
/// runtime.
///
/// # Examples
///
/// ```rust
/// use futures::StreamExt;
/// use tallyflow::generator::AsyncGenerator;
///
/// #[tokio::main]
/// async fn main() {
///     let generator = AsyncGenerator::map_produce(vec![1, 2, 3], |value| value * 10);
///     let values: Vec<i32> = generator.collect().await;
///     assert_eq!(values, vec![10, 20, 30]);
/// }
/// ```
pub struct AsyncGenerator<V> {
    receiver: mpsc::Receiver<V>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    exhausted: bool,
}

impl<V: Send + 'static> AsyncGenerator<V> {
    /// Streams every element of `source` in order.
    pub fn produce<I>(source: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: Send + 'static,
    {
        Self::spawn(source.into_iter(), Some)
    }

    /// Streams `transform(element)` for every element of `source`.
    ///
    /// An empty `source` yields an already exhausted generator without
    /// spawning a task.
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
    /// An empty `source` yields an already exhausted generator without
    /// spawning a task.
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
        let (sender, receiver) = mpsc::channel(1);
        let stop = Arc::new(AtomicBool::new(false));
        let producer_stop = Arc::clone(&stop);

        let handle = tokio::spawn(async move {
            let mut skipped = 0_usize;
            for element in source {
                if producer_stop.load(Ordering::Acquire) {
                    log::debug!("async generator producer observed stop flag");
                    return;
                }
                let Some(value) = step(element) else {
                    // Rejected elements never reach an await point on their own.
                    skipped += 1;
                    if skipped.is_multiple_of(SKIP_YIELD_INTERVAL) {
                        tokio::task::yield_now().await;
                    }
                    continue;
                };
                if sender.send(value).await.is_err() {
                    log::debug!("async generator consumer went away; producer exiting");
                    return;
                }
            }
            log::debug!("async generator producer finished");
        });
        log::debug!("async generator producer spawned");

        Self {
            receiver,
            stop,
            handle: Some(handle),
            exhausted: false,
        }
    }
}

impl<V> AsyncGenerator<V> {
    /// Creates a generator that yields nothing and owns no task.
    ///
    /// Does not require a runtime.
    pub fn exhausted() -> Self {
        let (_, receiver) = mpsc::channel(1);
        Self {
            receiver,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
            exhausted: true,
        }
    }

    /// Waits for the next element, or `None` at end-of-sequence.
    ///
    /// Keeps returning `None` once the end has been observed.
    pub async fn recv(&mut self) -> Option<V> {
        if self.exhausted {
            return None;
        }
        let received = self.receiver.recv().await;
        if received.is_none() {
            self.exhausted = true;
        }
        received
    }

    /// Returns `true` once end-of-sequence has been observed or the
    /// generator was cancelled.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns `true` if the stop flag has been raised.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Stops the producer and waits for its task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::ProducerPanicked`] if the task panicked and
    /// [`GeneratorError::TaskAborted`] if the runtime cancelled it.
    pub async fn cancel(&mut self) -> Result<(), GeneratorError> {
        self.signal_stop();
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.await {
            Ok(()) => Ok(()),
            Err(error) if error.is_panic() => {
                log::warn!("async generator producer panicked");
                Err(GeneratorError::ProducerPanicked)
            }
            Err(_) => Err(GeneratorError::TaskAborted),
        }
    }

    fn signal_stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        self.receiver.close();
        if !self.exhausted && self.handle.is_some() {
            log::debug!("async generator cancelled before exhaustion");
        }
        self.exhausted = true;
    }
}

impl<V> Stream for AsyncGenerator<V> {
    type Item = V;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.exhausted {
            return Poll::Ready(None);
        }
        let polled = this.receiver.poll_recv(context);
        if let Poll::Ready(None) = polled {
            this.exhausted = true;
        }
        polled
    }
}

impl<V> FusedStream for AsyncGenerator<V> {
    fn is_terminated(&self) -> bool {
        self.exhausted
    }
}

impl<V> Drop for AsyncGenerator<V> {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

impl<V> fmt::Debug for AsyncGenerator<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AsyncGenerator")
            .field("exhausted", &self.exhausted)
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}
