//! Headless sink: every frame becomes a log line.

use tracing::info;

use helping_core::{Rgb, WallClockTime};

use crate::traits::{RenderError, RenderSink, IDLE_COLOR};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, message: &str, color: Rgb) -> Result<(), RenderError> {
        info!(target: "display", %color, "{message}");
        Ok(())
    }

    fn show_idle(&mut self, now: &WallClockTime) -> Result<(), RenderError> {
        info!(target: "display", color = %IDLE_COLOR, idle = true, "{}", now.hh_mm());
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "log"
    }
}
