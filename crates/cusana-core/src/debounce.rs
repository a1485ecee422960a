//! Cancellable debounce timer.
//!
//! Every call to [`Debouncer::schedule`] invalidates the previously
//! scheduled value. The returned future resolves after the quiet period
//! with `Some(value)` if it is still the latest, or `None` if it was
//! superseded or cancelled in the meantime.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Coalesces bursts of values into the last one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedules `value`, invalidating anything scheduled before.
    pub fn schedule<T>(&self, value: T) -> impl Future<Output = Option<T>> + Send + 'static
    where
        T: Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        async move {
            tokio::time::sleep(delay).await;
            (generation.load(Ordering::Acquire) == ticket).then_some(value)
        }
    }

    /// Invalidates the pending value, if any.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
