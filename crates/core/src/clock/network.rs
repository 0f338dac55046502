use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use tracing::{info, warn};

use super::ClockSource;
use crate::error::{ClockError, SyncError};
use crate::time::WallClockTime;

/// HTTP time authority: reads the `Date` header of a `GET` response.
///
/// The clock stores the skew between the authority and the host clock.
/// A failed resync keeps the previous skew, so the clock only reports
/// `Unsynchronized` until its first successful sync.
#[derive(Debug)]
pub struct NetworkClock {
    url: String,
    offset: FixedOffset,
    client: reqwest::Client,
    /// Authority time minus host time, once known.
    skew: Option<TimeDelta>,
}

impl NetworkClock {
    /// Create a clock for `url`; every request is bounded by `timeout`.
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        offset: FixedOffset,
    ) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            offset,
            client,
            skew: None,
        })
    }

    /// Last measured skew in milliseconds (authority minus host).
    pub fn skew_millis(&self) -> Option<i64> {
        self.skew.map(|s| s.num_milliseconds())
    }

    async fn fetch_authority_time(&self) -> Result<DateTime<Utc>, SyncError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let header = response
            .headers()
            .get(reqwest::header::DATE)
            .ok_or(SyncError::MissingDate)?;
        let value = header.to_str().map_err(|e| SyncError::InvalidDate {
            value: String::from_utf8_lossy(header.as_bytes()).into_owned(),
            reason: e.to_string(),
        })?;
        let parsed = DateTime::parse_from_rfc2822(value).map_err(|e| SyncError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        Ok(parsed.with_timezone(&Utc))
    }
}

#[async_trait]
impl ClockSource for NetworkClock {
    fn now(&self) -> Result<WallClockTime, ClockError> {
        let skew = self.skew.ok_or(ClockError::Unsynchronized)?;
        Ok(WallClockTime::from_utc(Utc::now() + skew, self.offset))
    }

    async fn synchronize(&mut self) -> bool {
        let requested = Utc::now();
        match self.fetch_authority_time().await {
            Ok(authority) => {
                let received = Utc::now();
                // The header was stamped somewhere between request and response.
                let midpoint = requested + (received - requested) / 2;
                let skew = authority - midpoint;
                info!(
                    url = %self.url,
                    skew_ms = skew.num_milliseconds(),
                    first = self.skew.is_none(),
                    "clock synchronized"
                );
                self.skew = Some(skew);
                true
            }
            Err(e) => {
                warn!(
                    url = %self.url,
                    error = %e,
                    keeping_previous = self.skew.is_some(),
                    "clock sync failed"
                );
                false
            }
        }
    }

    fn name(&self) -> &str {
        "network"
    }
}
