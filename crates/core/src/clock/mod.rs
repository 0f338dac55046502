//! Clock sources: the appliance's only view of wall-clock time.
//!
//! A [`ClockSource`] is unreliable by contract. [`ClockSource::now`] fails
//! with [`ClockError::Unsynchronized`] until one [`ClockSource::synchronize`]
//! call has succeeded, and each `synchronize` call is a single bounded
//! attempt. Retrying is the caller's job.

mod manual;
mod network;
mod simulated;
mod system;

use async_trait::async_trait;

use crate::error::ClockError;
use crate::time::WallClockTime;

pub use manual::ManualClock;
pub use network::NetworkClock;
pub use simulated::SimulatedClock;
pub use system::SystemClock;

/// Source of local wall-clock time.
#[async_trait]
pub trait ClockSource: Send {
    /// Current local time, or `Unsynchronized` before the first successful sync.
    fn now(&self) -> Result<WallClockTime, ClockError>;

    /// Make one bounded synchronization attempt against the time authority.
    async fn synchronize(&mut self) -> bool;

    fn is_synchronized(&self) -> bool {
        self.now().is_ok()
    }

    /// Short name for logs (e.g. `"system"`, `"network"`).
    fn name(&self) -> &str;
}

#[async_trait]
impl ClockSource for Box<dyn ClockSource> {
    fn now(&self) -> Result<WallClockTime, ClockError> {
        (**self).now()
    }

    async fn synchronize(&mut self) -> bool {
        (**self).synchronize().await
    }

    fn is_synchronized(&self) -> bool {
        (**self).is_synchronized()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
