use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Local};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

/// Parse a profiled env var, falling back to `default` when unset or unparseable.
fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparseable config value, using default");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub rules: RulesConfig,
    pub clock: ClockConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `HELPING_PROFILE`. When set (e.g. `DEMO`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("HELPING_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            rules: RulesConfig::from_env_profiled(p),
            clock: ClockConfig::from_env_profiled(p),
            display: DisplayConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  rules:    file={}",
            self.rules
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in defaults)".to_string())
        );
        tracing::info!(
            "  clock:    time_url={}, utc_offset={}, sync_timeout={}s, retry={}s",
            self.clock.time_url.as_deref().unwrap_or("(none)"),
            self.clock
                .utc_offset_minutes
                .map(|m| format!("{m}m"))
                .unwrap_or_else(|| "host".to_string()),
            self.clock.sync_timeout_secs,
            self.clock.sync_retry_secs,
        );
        tracing::info!(
            "  display:  tick={}ms, hold={}s, pixels={}",
            self.display.tick_interval_ms,
            self.display.reminder_hold_secs,
            self.display.light_pixel_count,
        );
    }

    /// Machine-readable view of the effective configuration.
    pub fn summary_json(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "rules": { "file": self.rules.file },
            "clock": {
                "time_url": self.clock.time_url,
                "utc_offset_minutes": self.clock.utc_offset_minutes,
                "sync_timeout_secs": self.clock.sync_timeout_secs,
                "sync_retry_secs": self.clock.sync_retry_secs,
                "resync_interval_secs": self.clock.resync_interval_secs,
            },
            "display": {
                "tick_interval_ms": self.display.tick_interval_ms,
                "reminder_hold_secs": self.display.reminder_hold_secs,
                "light_pixel_count": self.display.light_pixel_count,
            },
        })
    }
}

// ── Rules ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// YAML reminder file; `None` uses the built-in schedule.
    pub file: Option<PathBuf>,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            file: profiled_env_opt(p, "REMINDER_RULES_FILE").map(PathBuf::from),
        }
    }
}

// ── Clock / time sync ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// HTTP endpoint whose `Date` header is the time authority.
    pub time_url: Option<String>,
    /// Local offset from UTC; `None` uses the host's current offset.
    pub utc_offset_minutes: Option<i32>,
    pub sync_timeout_secs: u64,
    pub sync_retry_secs: u64,
    pub resync_interval_secs: u64,
}

impl ClockConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            time_url: profiled_env_opt(p, "TIME_URL"),
            utc_offset_minutes: profiled_env_opt(p, "UTC_OFFSET_MINUTES")
                .and_then(|v| v.parse().ok()),
            sync_timeout_secs: profiled_env_parse(p, "SYNC_TIMEOUT_SECS", 5),
            sync_retry_secs: profiled_env_parse(p, "SYNC_RETRY_SECS", 30),
            resync_interval_secs: profiled_env_parse(p, "RESYNC_INTERVAL_SECS", 6 * 3_600),
        }
    }

    /// Resolve the configured UTC offset.
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        match self.utc_offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or(ConfigError::InvalidUtcOffset(minutes)),
            None => Ok(*Local::now().offset()),
        }
    }

    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    pub fn sync_retry(&self) -> Duration {
        Duration::from_secs(self.sync_retry_secs)
    }

    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs)
    }
}

// ── Display / loop cadence ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub tick_interval_ms: u64,
    /// How long a fired reminder stays on screen before the idle clock returns.
    pub reminder_hold_secs: u64,
    pub light_pixel_count: usize,
}

impl DisplayConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            tick_interval_ms: profiled_env_parse(p, "TICK_INTERVAL_MS", 1_000),
            reminder_hold_secs: profiled_env_parse(p, "REMINDER_HOLD_SECS", 60),
            light_pixel_count: profiled_env_parse(p, "LIGHT_PIXEL_COUNT", 7),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn reminder_hold(&self) -> Duration {
        Duration::from_secs(self.reminder_hold_secs)
    }
}
