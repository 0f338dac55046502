use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ClockSource;
use crate::error::ClockError;
use crate::time::WallClockTime;

/// Demo clock that starts at a chosen time and runs `speed` times faster
/// than real time. Useful for watching a whole day of reminders in minutes.
#[derive(Debug)]
pub struct SimulatedClock {
    start: WallClockTime,
    started: Instant,
    speed: u32,
    failures_left: u32,
    synchronized: bool,
}

impl SimulatedClock {
    pub fn new(start: WallClockTime, speed: u32) -> Self {
        Self {
            start,
            started: Instant::now(),
            speed: speed.max(1),
            failures_left: 0,
            synchronized: false,
        }
    }

    /// Fail the first `n` synchronization attempts, as a flaky network would.
    pub fn with_sync_failures(mut self, n: u32) -> Self {
        self.failures_left = n;
        self
    }
}

#[async_trait]
impl ClockSource for SimulatedClock {
    fn now(&self) -> Result<WallClockTime, ClockError> {
        if !self.synchronized {
            return Err(ClockError::Unsynchronized);
        }
        let elapsed = self.started.elapsed().as_millis() as u64;
        Ok(self.start.plus_millis(elapsed.saturating_mul(u64::from(self.speed))))
    }

    async fn synchronize(&mut self) -> bool {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            warn!(remaining = self.failures_left, "simulated sync failure");
            return false;
        }
        if !self.synchronized {
            info!(start = %self.start, speed = self.speed, "simulated clock running");
        }
        self.synchronized = true;
        true
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
