//! YAML reminder file loader.
//!
//! A reminder file holds one `rules` list (periodic and time-of-day rules
//! interleaved in declaration order) and an optional `tasks` map with the
//! message and light color for each task.

mod core;
mod error;


pub use self::core::{load_reminder_file, parse_reminder_yaml, ReminderFile};
pub use self::error::{Result, RuleError};
