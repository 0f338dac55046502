//! Reminder rule validation with structured errors and warnings.
//!
//! Every rule is checked and every problem collected before anything is
//! reported, so a broken rule file lists all of its mistakes at once.
//! Errors block the rule set from being built; warnings are advisory.

mod schedule_checks;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::loader::RuleError;
use crate::schema::ReminderRule;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A single finding, located by a path such as `rules[2].interval_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Log warnings, then turn any errors into [`RuleError::InvalidConfiguration`].
    pub fn into_result(self) -> Result<(), RuleError> {
        for w in &self.warnings {
            warn!(path = %w.path, "{}", w.message);
        }
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RuleError::InvalidConfiguration(
                self.errors.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a list of rules in declaration order.
pub fn validate_rules(rules: &[ReminderRule]) -> ValidationResult {
    let mut result = ValidationResult::default();
    for (index, rule) in rules.iter().enumerate() {
        schedule_checks::validate_rule(index, rule, &mut result);
    }
    schedule_checks::validate_unique_tasks(rules, &mut result);
    result
}
