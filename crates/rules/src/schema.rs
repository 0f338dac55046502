//! Reminder rule types.
//!
//! Rules are plain data: a [`TaskId`] plus either a periodic interval or a
//! fixed time of day. Each rule knows how to test itself against a
//! [`WallClockTime`] and which occurrence key a match belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};

use helping_core::{Rgb, WallClockTime};

// ── Task identifiers ────────────────────────────────────────────────

/// Every reminder the appliance knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskId {
    Restroom,
    FeetUp,
    MoveAround,
    Breakfast,
    Dishes,
    Lunch,
    WindDown,
}

impl TaskId {
    pub const ALL: [TaskId; 7] = [
        TaskId::Restroom,
        TaskId::FeetUp,
        TaskId::MoveAround,
        TaskId::Breakfast,
        TaskId::Dishes,
        TaskId::Lunch,
        TaskId::WindDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskId::Restroom => "restroom",
            TaskId::FeetUp => "feet_up",
            TaskId::MoveAround => "move_around",
            TaskId::Breakfast => "breakfast",
            TaskId::Dishes => "dishes",
            TaskId::Lunch => "lunch",
            TaskId::WindDown => "wind_down",
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rules ───────────────────────────────────────────────────────────

/// Fires whenever the minute of the hour is a multiple of `interval_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodicRule {
    pub task: TaskId,
    pub interval_minutes: u32,
}

/// Fires once per day when the clock reads exactly `hour:minute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeOfDayRule {
    pub task: TaskId,
    /// Signed and wide so out-of-range values reach validation instead of
    /// failing the YAML parse.
    pub hour: i64,
    pub minute: i64,
}

/// One declared rule. Declaration order across both kinds is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReminderRule {
    Periodic(PeriodicRule),
    TimeOfDay(TimeOfDayRule),
}

/// Which occurrence of a recurring rule has been served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OccurrenceKey {
    /// Absolute minute number (periodic rules).
    Minute(u64),
    /// Absolute day number (time-of-day rules).
    Day(u64),
}

impl ReminderRule {
    pub fn periodic(task: TaskId, interval_minutes: u32) -> Self {
        ReminderRule::Periodic(PeriodicRule {
            task,
            interval_minutes,
        })
    }

    pub fn time_of_day(task: TaskId, hour: u8, minute: u8) -> Self {
        ReminderRule::TimeOfDay(TimeOfDayRule {
            task,
            hour: i64::from(hour),
            minute: i64::from(minute),
        })
    }

    pub fn task(&self) -> TaskId {
        match self {
            ReminderRule::Periodic(r) => r.task,
            ReminderRule::TimeOfDay(r) => r.task,
        }
    }

    /// Whether the rule's trigger condition holds at `now`.
    ///
    /// A zero interval never matches; validation rejects it before a rule
    /// set can be built.
    pub fn matches(&self, now: &WallClockTime) -> bool {
        match self {
            ReminderRule::Periodic(r) => {
                u32::from(now.minute()).checked_rem(r.interval_minutes) == Some(0)
            }
            ReminderRule::TimeOfDay(r) => {
                i64::from(now.hour()) == r.hour && i64::from(now.minute()) == r.minute
            }
        }
    }

    pub fn occurrence_key(&self, now: &WallClockTime) -> OccurrenceKey {
        match self {
            ReminderRule::Periodic(_) => OccurrenceKey::Minute(now.minute_key()),
            ReminderRule::TimeOfDay(_) => OccurrenceKey::Day(now.day_key()),
        }
    }
}

impl fmt::Display for ReminderRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderRule::Periodic(r) => {
                write!(f, "{} every {} minutes", r.task, r.interval_minutes)
            }
            ReminderRule::TimeOfDay(r) => {
                write!(f, "{} daily at {:02}:{:02}", r.task, r.hour, r.minute)
            }
        }
    }
}

// ── Display entries and fire events ─────────────────────────────────

/// What to show for a task: a message template and the light color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDisplay {
    pub message: String,
    pub color: Rgb,
}

impl TaskDisplay {
    pub fn new(message: impl Into<String>, color: Rgb) -> Self {
        Self {
            message: message.into(),
            color,
        }
    }
}

/// A rule matched during a tick. Consumed immediately by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireEvent {
    pub task: TaskId,
    pub at: WallClockTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8) -> WallClockTime {
        WallClockTime::from_day_and_time(10, hour, minute, 0).unwrap()
    }

    #[test]
    fn periodic_matches_multiples_of_interval() {
        let rule = ReminderRule::periodic(TaskId::Restroom, 5);
        assert!(rule.matches(&at(9, 0)));
        assert!(rule.matches(&at(9, 55)));
        assert!(!rule.matches(&at(9, 3)));
    }

    #[test]
    fn zero_interval_never_matches() {
        let rule = ReminderRule::periodic(TaskId::Restroom, 0);
        assert!(!rule.matches(&at(9, 0)));
    }

    #[test]
    fn time_of_day_matches_exact_minute_only() {
        let rule = ReminderRule::time_of_day(TaskId::Breakfast, 8, 30);
        assert!(rule.matches(&at(8, 30)));
        assert!(!rule.matches(&at(8, 31)));
        assert!(!rule.matches(&at(20, 30)));
    }

    #[test]
    fn occurrence_keys_use_minute_or_day() {
        let now = at(8, 30);
        let periodic = ReminderRule::periodic(TaskId::FeetUp, 15);
        let daily = ReminderRule::time_of_day(TaskId::Breakfast, 8, 30);
        assert_eq!(
            periodic.occurrence_key(&now),
            OccurrenceKey::Minute(now.minute_key())
        );
        assert_eq!(daily.occurrence_key(&now), OccurrenceKey::Day(10));
    }

    #[test]
    fn rules_deserialize_from_tagged_yaml() {
        let yaml = r#"
- kind: periodic
  task: feet_up
  interval_minutes: 11
- kind: time_of_day
  task: wind_down
  hour: 18
  minute: 0
"#;
        let rules: Vec<ReminderRule> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules[0], ReminderRule::periodic(TaskId::FeetUp, 11));
        assert_eq!(rules[1], ReminderRule::time_of_day(TaskId::WindDown, 18, 0));
    }

    #[test]
    fn unknown_task_name_is_rejected() {
        let yaml = "kind: periodic\ntask: nap\ninterval_minutes: 5\n";
        assert!(serde_yaml::from_str::<ReminderRule>(yaml).is_err());
    }

    #[test]
    fn display_reads_naturally() {
        assert_eq!(
            ReminderRule::periodic(TaskId::MoveAround, 14).to_string(),
            "move_around every 14 minutes"
        );
        assert_eq!(
            ReminderRule::time_of_day(TaskId::Lunch, 13, 0).to_string(),
            "lunch daily at 13:00"
        );
        assert_eq!(TaskId::ALL.len(), 7);
    }
}
