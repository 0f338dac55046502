//! Reminder display for the helping-hands appliance.
//!
//! Provides:
//! - [`RenderSink`] trait for the display and light strip
//! - [`TaskCatalog`] mapping tasks to message templates and colors
//! - [`Dispatcher`] that turns fire events into display updates
//! - Sinks: terminal ([`ConsoleSink`]), log-only ([`LogSink`]) and
//!   in-memory ([`RecordingSink`])

pub mod catalog;
pub mod console;
pub mod dispatcher;
pub mod headless;
pub mod recording;
pub mod templating;
pub mod traits;

pub use catalog::TaskCatalog;
pub use console::ConsoleSink;
pub use dispatcher::{Dispatcher, FALLBACK_COLOR, UNKNOWN_TASK_MESSAGE};
pub use headless::LogSink;
pub use recording::{RecordingSink, RenderCall};
pub use templating::{TemplateContext, TemplateRenderer};
pub use traits::{DispatchResult, RenderError, RenderSink, Shown};
