//! In-memory sink that records every call. Used by tests and dry runs.

use helping_core::{Rgb, WallClockTime};

use crate::traits::{RenderError, RenderSink};

/// One call made to a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Render { message: String, color: Rgb },
    Idle { at: WallClockTime },
    Startup,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Vec<RenderCall>,
    failures_left: u32,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` calls fail with an I/O error. Failed calls are
    /// still recorded.
    pub fn fail_next(&mut self, n: u32) {
        self.failures_left = n;
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Messages passed to `render`, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::Render { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn idle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RenderCall::Idle { .. }))
            .count()
    }

    fn record(&mut self, call: RenderCall) -> Result<(), RenderError> {
        self.calls.push(call);
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(RenderError::Io(std::io::Error::other("recording sink failure")));
        }
        Ok(())
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, message: &str, color: Rgb) -> Result<(), RenderError> {
        self.record(RenderCall::Render {
            message: message.to_string(),
            color,
        })
    }

    fn show_idle(&mut self, now: &WallClockTime) -> Result<(), RenderError> {
        self.record(RenderCall::Idle { at: *now })
    }

    fn show_startup(&mut self) -> Result<(), RenderError> {
        self.record(RenderCall::Startup)
    }

    fn sink_name(&self) -> &str {
        "recording"
    }
}
