//! [`Scheduler`]: turns clock readings into fire events.

use std::fmt;

use tracing::{debug, info, warn};

use helping_core::{ClockSource, WallClockTime};

use crate::rule_set::ReminderRuleSet;
use crate::schema::FireEvent;

use super::tracker::FireTracker;

/// Where the scheduler is in its tick cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// The clock has not produced a valid time yet (or lost it).
    Unsynchronized,
    /// Waiting for the next tick.
    Idle,
    /// Inside `tick_at`.
    Evaluating,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerState::Unsynchronized => write!(f, "unsynchronized"),
            SchedulerState::Idle => write!(f, "idle"),
            SchedulerState::Evaluating => write!(f, "evaluating"),
        }
    }
}

/// Evaluates every rule once per tick and fires each occurrence at most once.
///
/// The scheduler owns its [`FireTracker`]; the clock is borrowed per tick.
pub struct Scheduler {
    rules: ReminderRuleSet,
    tracker: FireTracker,
    state: SchedulerState,
    skipped_ticks: u64,
}

impl Scheduler {
    pub fn new(rules: ReminderRuleSet) -> Self {
        Self {
            rules,
            tracker: FireTracker::new(),
            state: SchedulerState::Unsynchronized,
            skipped_ticks: 0,
        }
    }

    /// Read the clock and evaluate the rules against it.
    ///
    /// When the clock is unsynchronized nothing is evaluated and the tracker
    /// is left untouched. An occurrence missed that way is not recovered.
    pub fn tick<C: ClockSource + ?Sized>(&mut self, clock: &C) -> Vec<FireEvent> {
        let now = match clock.now() {
            Ok(now) => now,
            Err(e) => {
                if self.state != SchedulerState::Unsynchronized {
                    warn!(clock = clock.name(), error = %e, "clock lost synchronization");
                }
                self.state = SchedulerState::Unsynchronized;
                self.skipped_ticks += 1;
                debug!(skipped = self.skipped_ticks, "tick skipped, clock unsynchronized");
                return Vec::new();
            }
        };

        if self.state == SchedulerState::Unsynchronized {
            info!(
                clock = clock.name(),
                time = %now,
                skipped = self.skipped_ticks,
                "clock synchronized, scheduler running"
            );
            self.state = SchedulerState::Idle;
        }
        self.tick_at(now)
    }

    /// Evaluate all rules against `now`, in declaration order.
    ///
    /// Every rule that matches and has not served this occurrence fires.
    pub fn tick_at(&mut self, now: WallClockTime) -> Vec<FireEvent> {
        self.state = SchedulerState::Evaluating;

        let mut events = Vec::new();
        for rule in &self.rules {
            if !rule.matches(&now) {
                continue;
            }
            let task = rule.task();
            let key = rule.occurrence_key(&now);
            if self.tracker.has_fired(task, key) {
                continue;
            }
            self.tracker.mark_fired(task, key);
            debug!(task = %task, rule = %rule, time = %now, "rule fired");
            events.push(FireEvent { task, at: now });
        }

        self.state = SchedulerState::Idle;
        events
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn rules(&self) -> &ReminderRuleSet {
        &self.rules
    }

    pub fn tracker(&self) -> &FireTracker {
        &self.tracker
    }

    /// Ticks skipped because the clock was unsynchronized.
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }
}
