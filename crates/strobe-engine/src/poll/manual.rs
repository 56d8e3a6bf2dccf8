use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;

use crate::time::{ManualClock, TimeSource};

use super::source::{PollCallback, PollSource, PollSubscription};

#[derive(Default)]
struct Slot {
    generation: u64,
    callback: Option<PollCallback>,
}

/// Poll source driven by hand.
///
/// Nothing happens until [`fire`](Self::fire) or [`advance`](Self::advance) is
/// called; the active callback then runs synchronously on the caller's thread.
/// Useful for tests and for replaying recorded timestamps.
#[derive(Clone, Default)]
pub struct ManualPollSource {
    clock: ManualClock,
    slot: Arc<Mutex<Slot>>,
}

impl ManualPollSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: ManualClock) -> Self {
        Self { clock, slot: Arc::default() }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Returns `true` while a subscription is active.
    pub fn is_subscribed(&self) -> bool {
        self.lock().callback.is_some()
    }

    /// Delivers the current clock time to the active subscriber, if any.
    pub fn fire(&self) -> bool {
        let now = self.clock.now();
        self.fire_at(now)
    }

    /// Sets the clock to `seconds` and delivers it.
    pub fn fire_at(&self, seconds: f64) -> bool {
        self.clock.set(seconds);
        match self.lock().callback.as_mut() {
            Some(callback) => {
                callback(seconds);
                true
            }
            None => false,
        }
    }

    /// Moves the clock forward by `dt` seconds and delivers the new time.
    pub fn advance(&self, dt: f64) -> bool {
        let now = self.clock.advance(dt);
        self.fire_at(now)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PollSource for ManualPollSource {
    type Subscription = ManualSubscription;

    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn subscribe(&mut self, _cadence: Duration, callback: PollCallback) -> Result<ManualSubscription> {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.callback = Some(callback);
        Ok(ManualSubscription {
            generation: slot.generation,
            slot: self.slot.clone(),
        })
    }
}

/// Subscription to a [`ManualPollSource`].
pub struct ManualSubscription {
    generation: u64,
    slot: Arc<Mutex<Slot>>,
}

impl ManualSubscription {
    fn release(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        // A newer subscription may have replaced ours.
        if slot.generation == self.generation {
            slot.callback = None;
        }
    }
}

impl PollSubscription for ManualSubscription {
    fn cancel(self) {
        // Released by `Drop`.
    }
}

impl Drop for ManualSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn fire_without_subscriber_is_noop() {
        let source = ManualPollSource::new();
        assert!(!source.fire());
        assert!(!source.advance(1.0));
        assert_eq!(source.now(), 1.0);
    }

    #[test]
    fn delivers_clock_time() {
        let mut source = ManualPollSource::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = source
            .subscribe(Duration::ZERO, Box::new(move |t| sink.lock().unwrap().push(t)))
            .unwrap();

        source.fire_at(0.5);
        source.advance(0.25);
        source.fire();

        assert_eq!(*seen.lock().unwrap(), vec![0.5, 0.75, 0.75]);
    }

    #[test]
    fn cancel_stops_delivery() {
        let mut source = ManualPollSource::new();
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        let sub = source
            .subscribe(Duration::ZERO, Box::new(move |_| {
                inner.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        source.advance(0.1);
        sub.cancel();
        assert!(!source.is_subscribed());
        source.advance(0.1);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stale_subscription_does_not_release_newer_one() {
        let mut source = ManualPollSource::new();
        let old = source.subscribe(Duration::ZERO, Box::new(|_| {})).unwrap();
        let _new = source.subscribe(Duration::ZERO, Box::new(|_| {})).unwrap();

        drop(old);
        assert!(source.is_subscribed());
    }
}
