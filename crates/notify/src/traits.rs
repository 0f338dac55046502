//! Render sink trait definition and shared result types.

use helping_core::{Rgb, WallClockTime};
use helping_rules::TaskId;

/// Text color of the idle clock face.
pub const IDLE_COLOR: Rgb = Rgb::YELLOW;

/// Light pattern while idle: alternating blue and violet.
pub const IDLE_PATTERN: [Rgb; 2] = [Rgb::BLUE, Rgb::VIOLET];

/// Startup pattern across the light strip.
pub const STARTUP_PATTERN: [Rgb; 7] = [
    Rgb::VIOLET,
    Rgb::INDIGO,
    Rgb::BLUE,
    Rgb::GREEN,
    Rgb::YELLOW,
    Rgb::ORANGE,
    Rgb::RED,
];

/// Errors that can occur while putting something on the display.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("display I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no display entry for task '{0}'")]
    UnknownTask(TaskId),

    #[error("template rendering failed: {0}")]
    Template(String),
}

/// The display and light strip.
///
/// Calls are synchronous and expected to be fast; the dispatcher owns the
/// sink exclusively.
pub trait RenderSink: Send {
    /// Show `message` and set the lights to `color`.
    fn render(&mut self, message: &str, color: Rgb) -> Result<(), RenderError>;

    /// Show the idle clock face.
    fn show_idle(&mut self, now: &WallClockTime) -> Result<(), RenderError> {
        self.render(&now.hh_mm(), IDLE_COLOR)
    }

    /// Show the power-on pattern. Sinks without lights do nothing.
    fn show_startup(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Human-readable name for this sink (e.g., "console", "log").
    fn sink_name(&self) -> &str;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn render(&mut self, message: &str, color: Rgb) -> Result<(), RenderError> {
        (**self).render(message, color)
    }

    fn show_idle(&mut self, now: &WallClockTime) -> Result<(), RenderError> {
        (**self).show_idle(now)
    }

    fn show_startup(&mut self) -> Result<(), RenderError> {
        (**self).show_startup()
    }

    fn sink_name(&self) -> &str {
        (**self).sink_name()
    }
}

/// What the display currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Reminder {
        task: TaskId,
        message: String,
        color: Rgb,
        at: WallClockTime,
    },
    /// A task with no display entry; the fallback text is on screen.
    Unknown { task: TaskId, at: WallClockTime },
    Idle { at: WallClockTime },
}

/// Result of dispatching a single fire event.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub task: TaskId,
    /// The text handed to the sink.
    pub message: String,
    pub color: Rgb,
    /// True when the task had no display entry.
    pub fallback: bool,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}
