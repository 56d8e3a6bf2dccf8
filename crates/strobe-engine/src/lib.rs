//! Strobe engine crate.
//!
//! This crate owns the fixed-rate tick scheduler and the timing plumbing that
//! feeds it. Presentation layers consume its frame counter and achieved rate.

pub mod core;
pub mod poll;
pub mod time;

pub mod logging;

pub use crate::core::{Player, SchedulerHandle};
pub use crate::time::{RateScheduler, SchedulerSnapshot};
