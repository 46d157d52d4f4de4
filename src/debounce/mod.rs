//! Debounce guard - trailing-edge coalescing of rapid triggers.
//!
//! Each [`Debouncer::call`] restarts the window. Only the last trigger
//! handed in before the window elapses runs; earlier ones are dropped
//! without being polled.
//!
//! The timer task only sleeps. When it fires, the trigger's future is
//! spawned as its own task, so cancelling or restarting the timer never
//! interrupts a trigger that has already started.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Stateful debounce timer owned by whoever schedules through it.
///
/// Dropping the debouncer cancels a pending trigger.
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `trigger` to run once the window passes without another call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F, Fut>(&self, trigger: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            tokio::spawn(trigger());
        });

        if let Some(previous) = self.slot().replace(timer) {
            previous.abort();
        }
    }

    /// Drop the pending trigger, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a trigger is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}
