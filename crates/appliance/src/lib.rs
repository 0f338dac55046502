//! The helping-hands appliance: control loop and startup wiring.
//!
//! [`ReminderLoop`] owns one clock, one scheduler and one dispatcher and
//! drives them on a fixed tick until shutdown.

pub mod metrics;
pub mod runner;
pub mod setup;
pub mod types;

pub use metrics::LoopStats;
pub use runner::ReminderLoop;
pub use setup::{
    build_clock, build_sink, load_schedule, ClockKind, Schedule, SetupError, Simulation, SinkKind,
    TimeOfDay,
};
pub use types::{LoopSettings, StepReport};
