//! Core engine-facing contracts.
//!
//! This module ties the scheduler to a poll source. Higher layers (UI, tools)
//! call `Player::start`/`Player::stop` on intent changes and read outputs
//! through a `SchedulerHandle`; they never touch the poll machinery.

mod player;

pub use player::{Player, SchedulerHandle};
