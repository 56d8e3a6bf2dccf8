use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Result;

use crate::poll::{DEFAULT_POLL_CADENCE, PollSource, PollSubscription};
use crate::time::{RateScheduler, SchedulerSnapshot};

/// Shared, serialized access to the one [`RateScheduler`].
///
/// The poll callback and the controlling thread each hold a clone; every read
/// and write goes through the same lock.
#[derive(Debug, Clone, Default)]
pub struct SchedulerHandle {
    inner: Arc<Mutex<RateScheduler>>,
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to the scheduler.
    pub fn with<R>(&self, f: impl FnOnce(&mut RateScheduler) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        self.lock().snapshot()
    }

    pub fn frame_counter(&self) -> u64 {
        self.lock().frame_counter()
    }

    pub fn achieved_frequency(&self) -> f64 {
        self.lock().achieved_frequency()
    }

    fn lock(&self) -> MutexGuard<'_, RateScheduler> {
        // The state is plain counters; a panic mid-update cannot leave it unusable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drives a [`RateScheduler`] from a [`PollSource`].
///
/// `Player` is the "playing" switch: it owns the poll subscription and ties its
/// lifetime to the scheduler's running state.
///
/// # Example
/// ```rust,ignore
/// let mut player = Player::new(ThreadPollSource::new());
/// player.start(30.0)?;
/// // ... read player.snapshot() from the render loop ...
/// player.stop();
/// ```
pub struct Player<S: PollSource> {
    source: S,
    cadence: Duration,
    scheduler: SchedulerHandle,
    subscription: Option<S::Subscription>,
}

impl<S: PollSource> Player<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cadence: DEFAULT_POLL_CADENCE,
            scheduler: SchedulerHandle::new(),
            subscription: None,
        }
    }

    /// Sets the poll cadence used by subsequent `start` calls.
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a handle readers can poll for the counter and achieved rate.
    pub fn handle(&self) -> SchedulerHandle {
        self.scheduler.clone()
    }

    /// Resets the scheduler and starts polling at `target_hz`.
    ///
    /// Any previous subscription is retired first. A non-positive frequency
    /// leaves the player stopped without subscribing.
    pub fn start(&mut self, target_hz: f64) -> Result<()> {
        self.cancel_subscription();

        let now = self.source.now();
        let running = self.scheduler.with(|s| s.start(target_hz, now));
        if !running {
            return Ok(());
        }

        let scheduler = self.scheduler.clone();
        let subscription = self.source.subscribe(
            self.cadence,
            Box::new(move |now| {
                scheduler.with(|s| s.on_poll(now));
            }),
        );

        match subscription {
            Ok(sub) => {
                self.subscription = Some(sub);
                Ok(())
            }
            Err(e) => {
                self.scheduler.with(RateScheduler::stop);
                Err(e)
            }
        }
    }

    /// Stops polling. After this returns the frame counter no longer changes.
    pub fn stop(&mut self) {
        // Cancel before locking: the poll thread may be waiting on the lock.
        self.cancel_subscription();
        self.scheduler.with(RateScheduler::stop);
    }

    /// Restarts at a new frequency. Nothing carries over from the old rate.
    pub fn set_frequency(&mut self, target_hz: f64) -> Result<()> {
        self.stop();
        self.start(target_hz)
    }

    pub fn is_playing(&self) -> bool {
        self.subscription.is_some() && self.scheduler.with(|s| s.is_running())
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        self.scheduler.snapshot()
    }

    fn cancel_subscription(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }
    }
}

impl<S: PollSource> Drop for Player<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
