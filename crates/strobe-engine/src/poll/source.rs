use std::time::Duration;

use anyhow::Result;

/// Cadence used when the platform layer does not pick one (120 polls/s).
pub const DEFAULT_POLL_CADENCE: Duration = Duration::from_nanos(8_333_333);

/// Callback invoked with each timestamp sampled by a poll source, in seconds.
pub type PollCallback = Box<dyn FnMut(f64) + Send + 'static>;

/// A periodic timestamp producer.
///
/// `now` and the timestamps passed to subscribers share one timebase, so a
/// caller can take a baseline with `now()` and compare it to later polls.
pub trait PollSource {
    type Subscription: PollSubscription;

    /// Samples the source's timebase.
    fn now(&self) -> f64;

    /// Starts invoking `callback` roughly every `cadence`.
    fn subscribe(&mut self, cadence: Duration, callback: PollCallback) -> Result<Self::Subscription>;
}

/// Handle to an active subscription.
///
/// Dropping the handle must have the same effect as calling `cancel`.
pub trait PollSubscription {
    /// Retires the subscription. Once this returns the callback is not running
    /// and will never be invoked again.
    fn cancel(self);
}
