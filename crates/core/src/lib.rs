//! Shared building blocks for the helping-hands reminder appliance:
//! wall-clock snapshots, clock sources, colors, errors and configuration.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod time;

pub use clock::{ClockSource, ManualClock, NetworkClock, SimulatedClock, SystemClock};
pub use color::Rgb;
pub use config::Config;
pub use error::*;
pub use time::WallClockTime;
