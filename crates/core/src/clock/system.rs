use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use tracing::{debug, warn};

use super::ClockSource;
use crate::error::{ClockError, SyncError};
use crate::time::WallClockTime;

/// 2020-01-01T00:00:00Z. Anything earlier means the host RTC was never set.
const PLAUSIBLE_EPOCH_SECS: i64 = 1_577_836_800;

/// Host clock, trusted once it reads a plausible date.
#[derive(Debug, Clone)]
pub struct SystemClock {
    offset: FixedOffset,
    synchronized: bool,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            synchronized: false,
        }
    }

    fn check_host_clock() -> Result<(), SyncError> {
        let now = Utc::now();
        if now.timestamp() < PLAUSIBLE_EPOCH_SECS {
            return Err(SyncError::Implausible(now.to_rfc3339()));
        }
        Ok(())
    }
}

#[async_trait]
impl ClockSource for SystemClock {
    fn now(&self) -> Result<WallClockTime, ClockError> {
        if !self.synchronized {
            return Err(ClockError::Unsynchronized);
        }
        Ok(WallClockTime::from_utc(Utc::now(), self.offset))
    }

    async fn synchronize(&mut self) -> bool {
        match Self::check_host_clock() {
            Ok(()) => {
                if !self.synchronized {
                    debug!(offset = %self.offset, "host clock accepted");
                }
                self.synchronized = true;
                true
            }
            Err(e) => {
                warn!(error = %e, "host clock rejected");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "system"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsynchronized_until_first_sync() {
        let mut clock = SystemClock::new(FixedOffset::east_opt(0).unwrap());
        assert_eq!(clock.now(), Err(ClockError::Unsynchronized));
        assert!(!clock.is_synchronized());

        assert!(clock.synchronize().await);
        assert!(clock.is_synchronized());
        assert!(clock.now().is_ok());
    }
}
