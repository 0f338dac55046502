//! Task catalog: what each task looks like on the display.

use std::collections::BTreeMap;

use helping_core::Rgb;
use helping_rules::{ReminderRuleSet, TaskDisplay, TaskId};

use crate::templating::TemplateRenderer;
use crate::traits::RenderError;

/// Maps each [`TaskId`] to its message template and light color.
///
/// The catalog may be partial. Tasks without an entry are shown with the
/// dispatcher's fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCatalog {
    entries: BTreeMap<TaskId, TaskDisplay>,
}

impl TaskCatalog {
    pub fn new(entries: BTreeMap<TaskId, TaskDisplay>) -> Self {
        Self { entries }
    }

    /// Messages and colors the appliance ships with.
    pub fn defaults() -> Self {
        let entries = [
            (TaskId::Restroom, "Time to try to use the restroom!", Rgb::YELLOW),
            (TaskId::FeetUp, "Are your feet up?!", Rgb::ORANGE),
            (
                TaskId::MoveAround,
                "Lets get up and move around a little",
                Rgb::GREEN,
            ),
            (TaskId::Breakfast, "mmm yummy oatmeal", Rgb::VIOLET),
            (
                TaskId::Dishes,
                "Lets load the dishwasher, remember to keep cups together with their lids",
                Rgb::ORANGE,
            ),
            (TaskId::Lunch, "Time to eat some lunch!", Rgb::BLUE),
            (
                TaskId::WindDown,
                "Time to relax, take a shower and wind down",
                Rgb::INDIGO,
            ),
        ]
        .into_iter()
        .map(|(task, message, color)| (task, TaskDisplay::new(message, color)))
        .collect();
        Self { entries }
    }

    pub fn get(&self, task: TaskId) -> Option<&TaskDisplay> {
        self.entries.get(&task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, &TaskDisplay)> {
        self.entries.iter()
    }

    /// Tasks scheduled by `rules` that have no catalog entry.
    pub fn missing_for(&self, rules: &ReminderRuleSet) -> Vec<TaskId> {
        rules
            .tasks()
            .into_iter()
            .filter(|task| !self.entries.contains_key(task))
            .collect()
    }

    /// Syntax-check every message template. All failures are reported.
    pub fn validate(&self, renderer: &TemplateRenderer) -> Result<(), RenderError> {
        let problems: Vec<String> = self
            .entries
            .iter()
            .filter_map(|(task, display)| {
                renderer
                    .validate(&display.message)
                    .err()
                    .map(|e| format!("{task}: {e}"))
            })
            .collect();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(RenderError::Template(problems.join("; ")))
        }
    }
}

impl From<BTreeMap<TaskId, TaskDisplay>> for TaskCatalog {
    fn from(entries: BTreeMap<TaskId, TaskDisplay>) -> Self {
        Self::new(entries)
    }
}
