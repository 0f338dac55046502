use std::time::Duration;

use serde::Serialize;

use helping_core::Config;
use helping_rules::TaskId;

/// Timing knobs for the control loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoopSettings {
    /// How often `step` runs.
    pub tick_interval: Duration,
    /// Upper bound on a single synchronization attempt.
    pub sync_timeout: Duration,
    /// Wait between attempts while unsynchronized.
    pub sync_retry: Duration,
    /// Wait between resyncs once synchronized.
    pub resync_interval: Duration,
    /// How long a reminder stays up before the idle face may replace it.
    pub reminder_hold: Duration,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            sync_timeout: Duration::from_secs(5),
            sync_retry: Duration::from_secs(30),
            resync_interval: Duration::from_secs(6 * 3_600),
            reminder_hold: Duration::from_secs(60),
        }
    }
}

impl From<&Config> for LoopSettings {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: config.display.tick_interval(),
            sync_timeout: config.clock.sync_timeout(),
            sync_retry: config.clock.sync_retry(),
            resync_interval: config.clock.resync_interval(),
            reminder_hold: config.display.reminder_hold(),
        }
    }
}

/// Outcome of one [`ReminderLoop::step`](crate::ReminderLoop::step).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Clock state after the step.
    pub synchronized: bool,
    /// Whether a synchronization attempt was made this step.
    pub sync_attempted: bool,
    /// Tasks fired this step, in dispatch order.
    pub fired: Vec<TaskId>,
    /// Whether the idle clock face was redrawn.
    pub idle_refreshed: bool,
}
