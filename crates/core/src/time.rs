//! Wall-clock snapshots used by the scheduler.
//!
//! A [`WallClockTime`] is taken once per tick and never mutated. Its
//! `epoch_millis` is the *local* epoch (UTC epoch shifted by the configured
//! UTC offset), so `epoch_millis / MILLIS_PER_DAY` changes at local midnight
//! and the hour/minute/second fields always agree with it.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

pub const MILLIS_PER_SECOND: u64 = 1_000;
pub const MILLIS_PER_MINUTE: u64 = 60_000;
pub const MILLIS_PER_DAY: u64 = 86_400_000;

/// Immutable time-of-day snapshot with its absolute local epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallClockTime {
    hour: u8,
    minute: u8,
    second: u8,
    epoch_millis: u64,
}

impl WallClockTime {
    /// Build a snapshot from local epoch milliseconds.
    ///
    /// Hour, minute and second are derived from `epoch_millis` modulo one day.
    pub fn from_epoch_millis(epoch_millis: u64) -> Self {
        let secs_of_day = (epoch_millis % MILLIS_PER_DAY) / MILLIS_PER_SECOND;
        Self {
            hour: (secs_of_day / 3_600) as u8,
            minute: ((secs_of_day % 3_600) / 60) as u8,
            second: (secs_of_day % 60) as u8,
            epoch_millis,
        }
    }

    /// Convert a UTC instant to local wall-clock time at `offset`.
    ///
    /// Instants that would land before the local epoch are clamped to it.
    pub fn from_utc(utc: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local_millis =
            utc.timestamp_millis() + i64::from(offset.local_minus_utc()) * 1_000;
        Self::from_epoch_millis(local_millis.max(0) as u64)
    }

    /// Build a snapshot for `day` days after the local epoch at `hh:mm:ss`.
    ///
    /// Returns `None` when any component is out of range.
    pub fn from_day_and_time(day: u64, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        let secs_of_day = u64::from(hour) * 3_600 + u64::from(minute) * 60 + u64::from(second);
        Some(Self::from_epoch_millis(
            day * MILLIS_PER_DAY + secs_of_day * MILLIS_PER_SECOND,
        ))
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn epoch_millis(&self) -> u64 {
        self.epoch_millis
    }

    /// Absolute minute number since the local epoch.
    pub fn minute_key(&self) -> u64 {
        self.epoch_millis / MILLIS_PER_MINUTE
    }

    /// Absolute day number since the local epoch.
    pub fn day_key(&self) -> u64 {
        self.epoch_millis / MILLIS_PER_DAY
    }

    /// `HH:MM`, as shown on the idle clock face.
    pub fn hh_mm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// Snapshot `millis` later than this one.
    pub fn plus_millis(&self, millis: u64) -> Self {
        Self::from_epoch_millis(self.epoch_millis.saturating_add(millis))
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
