use std::collections::BTreeMap;

use serde::Serialize;

use helping_rules::TaskId;

use crate::types::StepReport;

/// Running counters for the control loop, logged at shutdown.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoopStats {
    pub steps: u64,
    /// Steps taken while the clock was unsynchronized.
    pub unsynchronized_steps: u64,
    pub sync_attempts: u64,
    pub sync_failures: u64,
    /// Fires per task.
    pub fired: BTreeMap<TaskId, u64>,
    /// Dispatches the sink rejected.
    pub render_failures: u64,
    pub idle_refreshes: u64,
}

impl LoopStats {
    /// Fold one step into the counters.
    pub fn record_step(&mut self, report: &StepReport) {
        self.steps += 1;
        if !report.synchronized {
            self.unsynchronized_steps += 1;
        }
        for task in &report.fired {
            *self.fired.entry(*task).or_default() += 1;
        }
        if report.idle_refreshed {
            self.idle_refreshes += 1;
        }
    }

    pub fn record_sync(&mut self, ok: bool) {
        self.sync_attempts += 1;
        if !ok {
            self.sync_failures += 1;
        }
    }

    pub fn total_fired(&self) -> u64 {
        self.fired.values().sum()
    }
}
