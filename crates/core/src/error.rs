use thiserror::Error;

/// Returned by [`ClockSource::now`](crate::clock::ClockSource::now).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// No successful synchronization since startup.
    #[error("clock is not synchronized")]
    Unsynchronized,
}

/// Why a single synchronization attempt failed.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("time authority response has no Date header")]
    MissingDate,

    #[error("invalid Date header '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("host clock reads implausible time {0}")]
    Implausible(String),

    #[error("synchronization timed out after {0} ms")]
    Timeout(u64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("UTC offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}', expected #RRGGBB")]
pub struct ParseColorError(pub String);
