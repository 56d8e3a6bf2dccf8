use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A monotonic timebase measured in seconds.
///
/// Implementations must be cheap to sample and safe to share with a poll thread.
pub trait TimeSource: Send + Sync + 'static {
    /// Seconds since an arbitrary, fixed origin.
    fn now(&self) -> f64;
}

/// Wall-clock timebase backed by `Instant`.
///
/// Timestamps are seconds since the clock was created, so they stay small and
/// keep full `f64` precision for the lifetime of the process.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    /// Returns the time elapsed since the origin as a `Duration`.
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Settable timebase for tests and deterministic driving.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { bits: Arc::new(AtomicU64::new(start.to_bits())) }
    }

    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::Release);
    }

    /// Moves the clock by `dt` seconds (negative values move it backwards).
    pub fn advance(&self, dt: f64) -> f64 {
        let next = self.now() + dt;
        self.set(next);
        next
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}
