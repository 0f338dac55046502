use std::time::Duration;

use async_trait::async_trait;

use super::ClockSource;
use crate::error::ClockError;
use crate::time::{WallClockTime, MILLIS_PER_MINUTE};

/// Hand-driven clock for tests and deterministic replay.
///
/// Starts unsynchronized. Time only moves through [`set`](Self::set) and
/// [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: WallClockTime,
    synchronized: bool,
    failures_left: u32,
    sync_attempts: u32,
}

impl ManualClock {
    pub fn new(start: WallClockTime) -> Self {
        Self {
            current: start,
            synchronized: false,
            failures_left: 0,
            sync_attempts: 0,
        }
    }

    /// A clock that is already synchronized at `start`.
    pub fn synchronized_at(start: WallClockTime) -> Self {
        Self {
            synchronized: true,
            ..Self::new(start)
        }
    }

    pub fn set(&mut self, time: WallClockTime) {
        self.current = time;
    }

    pub fn advance(&mut self, by: Duration) {
        self.current = self.current.plus_millis(by.as_millis() as u64);
    }

    pub fn advance_minutes(&mut self, minutes: u64) {
        self.current = self.current.plus_millis(minutes * MILLIS_PER_MINUTE);
    }

    /// Make the next `n` calls to `synchronize` fail.
    pub fn fail_next_syncs(&mut self, n: u32) {
        self.failures_left = n;
    }

    /// Number of `synchronize` calls made so far.
    pub fn sync_attempts(&self) -> u32 {
        self.sync_attempts
    }
}

#[async_trait]
impl ClockSource for ManualClock {
    fn now(&self) -> Result<WallClockTime, ClockError> {
        if self.synchronized {
            Ok(self.current)
        } else {
            Err(ClockError::Unsynchronized)
        }
    }

    async fn synchronize(&mut self) -> bool {
        self.sync_attempts += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return false;
        }
        self.synchronized = true;
        true
    }

    fn name(&self) -> &str {
        "manual"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_attempts_and_honours_failures() {
        let start = WallClockTime::from_day_and_time(0, 9, 0, 0).unwrap();
        let mut clock = ManualClock::new(start);
        clock.fail_next_syncs(1);

        assert!(!clock.synchronize().await);
        assert!(clock.synchronize().await);
        assert_eq!(clock.sync_attempts(), 2);

        clock.advance_minutes(90);
        let now = clock.now().unwrap();
        assert_eq!((now.hour(), now.minute()), (10, 30));

        clock.advance(Duration::from_secs(45));
        assert_eq!(clock.now().unwrap().second(), 45);
    }
}
