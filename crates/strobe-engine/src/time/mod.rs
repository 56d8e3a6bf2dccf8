//! Time subsystem.
//!
//! Provides the fixed-rate tick scheduler and the timebases that feed it.
//! Intended usage:
//! - one `RateScheduler` per playing visual (owned through `core::Player`)
//! - feed it timestamps from a single `TimeSource` so deltas are consistent

mod clock;
mod rate_scheduler;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use rate_scheduler::{MEASUREMENT_WINDOW_SECS, RateScheduler, SchedulerSnapshot};
