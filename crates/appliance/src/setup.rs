//! Startup wiring: reminder schedule, catalog, clock and sink selection.
//!
//! Everything here runs once before the loop starts, and every failure is
//! fatal for startup.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use helping_core::{
    ClockSource, Config, ConfigError, NetworkClock, SimulatedClock, SyncError, SystemClock,
    WallClockTime,
};
use helping_notify::{ConsoleSink, LogSink, RenderError, RenderSink, TaskCatalog, TemplateRenderer};
use helping_rules::{load_reminder_file, ReminderRuleSet, RuleError};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Rules(#[from] RuleError),

    #[error("invalid message template: {0}")]
    Template(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("network clock setup failed: {0}")]
    Sync(#[from] SyncError),

    #[error("network clock needs a time URL (--time-url or TIME_URL)")]
    MissingTimeUrl,
}

/// Which clock drives the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClockKind {
    System,
    Network,
    Simulated,
}

/// Where reminders are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkKind {
    Console,
    Log,
}

/// Options for [`ClockKind::Simulated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulation {
    pub start: TimeOfDay,
    pub speed: u32,
}

/// `HH:MM` as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{s}'"))?;
        let hour: u8 = h.trim().parse().map_err(|_| format!("invalid hour '{h}'"))?;
        let minute: u8 = m.trim().parse().map_err(|_| format!("invalid minute '{m}'"))?;
        if hour > 23 || minute > 59 {
            return Err(format!("time '{s}' is out of range"));
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Validated rules plus the catalog that displays them.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub rules: ReminderRuleSet,
    pub catalog: TaskCatalog,
}

/// Load the schedule from `path`, or use the built-in one.
///
/// A file without a `tasks` section uses the built-in catalog. A partial
/// `tasks` section is used as is; tasks it leaves out are logged here and
/// show the fallback text when they fire.
pub fn load_schedule(path: Option<&Path>) -> Result<Schedule, SetupError> {
    let (rules, catalog) = match path {
        Some(path) => {
            let file = load_reminder_file(path)?;
            let catalog = file
                .tasks
                .map(TaskCatalog::new)
                .unwrap_or_else(TaskCatalog::defaults);
            (file.rules, catalog)
        }
        None => {
            info!("using built-in reminder schedule");
            (ReminderRuleSet::defaults(), TaskCatalog::defaults())
        }
    };

    catalog.validate(&TemplateRenderer::new())?;

    let missing = catalog.missing_for(&rules);
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(ToString::to_string).collect();
        warn!(tasks = %names.join(", "), "scheduled tasks have no display entry");
    }

    for rule in &rules {
        info!(rule = %rule, "reminder scheduled");
    }

    Ok(Schedule { rules, catalog })
}

/// Build the clock selected on the command line.
pub fn build_clock(
    kind: ClockKind,
    config: &Config,
    simulation: Simulation,
) -> Result<Box<dyn ClockSource>, SetupError> {
    let offset = config.clock.utc_offset()?;
    let clock: Box<dyn ClockSource> = match kind {
        ClockKind::System => Box::new(SystemClock::new(offset)),
        ClockKind::Network => {
            let url = config
                .clock
                .time_url
                .as_deref()
                .ok_or(SetupError::MissingTimeUrl)?;
            Box::new(NetworkClock::new(url, config.clock.sync_timeout(), offset)?)
        }
        ClockKind::Simulated => {
            let start =
                WallClockTime::from_day_and_time(0, simulation.start.hour, simulation.start.minute, 0)
                    .unwrap_or_else(|| WallClockTime::from_epoch_millis(0));
            Box::new(SimulatedClock::new(start, simulation.speed))
        }
    };
    info!(clock = clock.name(), %offset, "clock selected");
    Ok(clock)
}

/// Build the sink selected on the command line.
pub fn build_sink(kind: SinkKind, config: &Config) -> Box<dyn RenderSink> {
    match kind {
        SinkKind::Console => Box::new(ConsoleSink::stdout(config.display.light_pixel_count)),
        SinkKind::Log => Box::new(LogSink::new()),
    }
}
