//! Tick-driven reminder scheduling.
//!
//! The [`Scheduler`] reads the clock once per tick, checks every rule in
//! declaration order, and produces a [`FireEvent`](crate::schema::FireEvent)
//! for each rule whose current occurrence has not been served yet. The
//! [`FireTracker`] remembers the last served occurrence per task.

mod core;
mod tracker;

#[cfg(test)]
mod tests;

pub use self::core::{Scheduler, SchedulerState};
pub use self::tracker::FireTracker;
