//! Schedule validation: intervals, times of day, and task uniqueness.

use std::collections::HashMap;

use super::ValidationResult;
use crate::schema::{ReminderRule, TaskId};

pub(super) fn validate_rule(index: usize, rule: &ReminderRule, result: &mut ValidationResult) {
    let path = format!("rules[{index}]");
    match rule {
        ReminderRule::Periodic(r) => {
            if r.interval_minutes == 0 {
                result.error(
                    format!("{path}.interval_minutes"),
                    "interval must be at least 1 minute",
                );
            } else if r.interval_minutes > 59 {
                result.warn(
                    format!("{path}.interval_minutes"),
                    format!(
                        "interval of {} minutes only matches minute 0 of each hour",
                        r.interval_minutes
                    ),
                );
            }
        }
        ReminderRule::TimeOfDay(r) => {
            if !(0..=23).contains(&r.hour) {
                result.error(
                    format!("{path}.hour"),
                    format!("hour {} is out of range 0-23", r.hour),
                );
            }
            if !(0..=59).contains(&r.minute) {
                result.error(
                    format!("{path}.minute"),
                    format!("minute {} is out of range 0-59", r.minute),
                );
            }
        }
    }
}

pub(super) fn validate_unique_tasks(rules: &[ReminderRule], result: &mut ValidationResult) {
    let mut first_seen: HashMap<TaskId, usize> = HashMap::new();
    for (index, rule) in rules.iter().enumerate() {
        let task = rule.task();
        if let Some(first) = first_seen.get(&task) {
            result.error(
                format!("rules[{index}].task"),
                format!("task '{task}' is already scheduled by rules[{first}]"),
            );
        } else {
            first_seen.insert(task, index);
        }
    }
}
