//! [`FireTracker`]: which occurrence of each task has already been served.

use std::collections::HashMap;

use crate::schema::{OccurrenceKey, TaskId};

/// Last served occurrence per task.
///
/// Owned by the scheduler. A task is marked the moment its fire event is
/// produced, so a later tick in the same minute (or day) cannot fire it twice.
#[derive(Debug, Clone, Default)]
pub struct FireTracker {
    last: HashMap<TaskId, OccurrenceKey>,
}

impl FireTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is at or before the occurrence last served for `task`.
    ///
    /// A clock stepped backwards therefore cannot serve a minute or day twice.
    pub fn has_fired(&self, task: TaskId, key: OccurrenceKey) -> bool {
        match (self.last.get(&task), key) {
            (Some(OccurrenceKey::Minute(last)), OccurrenceKey::Minute(key)) => key <= *last,
            (Some(OccurrenceKey::Day(last)), OccurrenceKey::Day(key)) => key <= *last,
            _ => false,
        }
    }

    pub fn mark_fired(&mut self, task: TaskId, key: OccurrenceKey) {
        self.last.insert(task, key);
    }

    pub fn last_fired(&self, task: TaskId) -> Option<OccurrenceKey> {
        self.last.get(&task).copied()
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
