//! Reminder rules for the helping-hands appliance.
//!
//! This crate provides:
//! - Reminder rule types (periodic and time-of-day) with serde deserialization
//! - Validation that collects every configuration error before reporting
//! - A YAML reminder file loader
//! - The tick-driven scheduler and its fire tracker

pub mod loader;
pub mod rule_set;
pub mod scheduler;
pub mod schema;
pub mod validation;

pub use loader::{load_reminder_file, parse_reminder_yaml, ReminderFile, RuleError};
pub use rule_set::ReminderRuleSet;
pub use scheduler::{FireTracker, Scheduler, SchedulerState};
pub use schema::{
    FireEvent, OccurrenceKey, PeriodicRule, ReminderRule, TaskDisplay, TaskId, TimeOfDayRule,
};
