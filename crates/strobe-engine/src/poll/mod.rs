//! Poll sources.
//!
//! A poll source samples a timebase at a coarse, fixed cadence and hands each
//! sample to a callback. The scheduler never owns a timer; it is fed by one of
//! these. Sources are swappable so the accumulator logic stays testable.

mod manual;
mod source;
mod thread;

pub use manual::{ManualPollSource, ManualSubscription};
pub use source::{DEFAULT_POLL_CADENCE, PollCallback, PollSource, PollSubscription};
pub use thread::{ThreadPollSource, ThreadSubscription};
