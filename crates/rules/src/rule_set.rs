//! Validated, immutable list of reminder rules.

use serde::Serialize;

use crate::loader::RuleError;
use crate::schema::{ReminderRule, TaskId};
use crate::validation::validate_rules;

/// Rules in declaration order. Only constructible through validation, and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReminderRuleSet {
    rules: Vec<ReminderRule>,
}

impl ReminderRuleSet {
    /// Validate `rules` and freeze them.
    ///
    /// All validation errors are collected into a single
    /// [`RuleError::InvalidConfiguration`].
    pub fn new(rules: Vec<ReminderRule>) -> Result<Self, RuleError> {
        validate_rules(&rules).into_result()?;
        Ok(Self { rules })
    }

    /// The schedule the appliance ships with.
    pub fn defaults() -> Self {
        Self {
            rules: vec![
                ReminderRule::periodic(TaskId::Restroom, 5),
                ReminderRule::periodic(TaskId::FeetUp, 11),
                ReminderRule::periodic(TaskId::MoveAround, 14),
                ReminderRule::time_of_day(TaskId::Breakfast, 8, 30),
                ReminderRule::time_of_day(TaskId::Dishes, 10, 0),
                ReminderRule::time_of_day(TaskId::Lunch, 13, 0),
                ReminderRule::time_of_day(TaskId::WindDown, 18, 0),
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&ReminderRule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReminderRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tasks referenced by at least one rule, in declaration order.
    pub fn tasks(&self) -> Vec<TaskId> {
        self.rules.iter().map(ReminderRule::task).collect()
    }
}

impl<'a> IntoIterator for &'a ReminderRuleSet {
    type Item = &'a ReminderRule;
    type IntoIter = std::slice::Iter<'a, ReminderRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
