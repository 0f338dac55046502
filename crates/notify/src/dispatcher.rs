//! Routes fire events to the display.
//!
//! The dispatcher resolves each event's task in the catalog, renders its
//! message template, and hands the result to the sink. A task with no
//! catalog entry shows the fallback text. Sink failures are logged and
//! recorded; they never stop later events.

use std::time::Instant;

use tracing::{debug, info, warn};

use helping_core::{Rgb, WallClockTime};
use helping_rules::FireEvent;

use crate::catalog::TaskCatalog;
use crate::templating::{TemplateContext, TemplateRenderer};
use crate::traits::{DispatchResult, RenderError, RenderSink, Shown};

/// Text shown for a task with no catalog entry.
pub const UNKNOWN_TASK_MESSAGE: &str = "Unknown task";

/// Light color used with [`UNKNOWN_TASK_MESSAGE`].
pub const FALLBACK_COLOR: Rgb = Rgb::WHITE;

/// Owns the render sink and turns fire events into display updates.
pub struct Dispatcher<S: RenderSink> {
    catalog: TaskCatalog,
    sink: S,
    renderer: TemplateRenderer,
    last_shown: Option<Shown>,
}

impl<S: RenderSink> Dispatcher<S> {
    pub fn new(catalog: TaskCatalog, sink: S) -> Self {
        Self {
            catalog,
            sink,
            renderer: TemplateRenderer::new(),
            last_shown: None,
        }
    }

    /// Dispatch events in order. Returns one result per event.
    pub fn dispatch(&mut self, events: &[FireEvent]) -> Vec<DispatchResult> {
        let mut results = Vec::with_capacity(events.len());
        for event in events {
            results.push(self.dispatch_one(event));
        }
        results
    }

    fn dispatch_one(&mut self, event: &FireEvent) -> DispatchResult {
        let start = Instant::now();

        let (message, color, fallback) = match self.catalog.get(event.task) {
            Some(display) => {
                let ctx = TemplateContext::for_event(event);
                let message = match self.renderer.render(&display.message, &ctx) {
                    Ok(rendered) => rendered,
                    Err(e) => {
                        warn!(task = %event.task, error = %e, "showing raw message");
                        display.message.clone()
                    }
                };
                (message, display.color, false)
            }
            None => {
                warn!(
                    task = %event.task,
                    error = %RenderError::UnknownTask(event.task),
                    "showing fallback"
                );
                (UNKNOWN_TASK_MESSAGE.to_string(), FALLBACK_COLOR, true)
            }
        };

        let result = self.sink.render(&message, color);
        let duration_ms = start.elapsed().as_millis() as u64;

        let (success, error) = match result {
            Ok(()) => {
                info!(
                    task = %event.task,
                    time = %event.at,
                    sink = self.sink.sink_name(),
                    %color,
                    fallback,
                    "reminder shown"
                );
                self.last_shown = Some(if fallback {
                    Shown::Unknown {
                        task: event.task,
                        at: event.at,
                    }
                } else {
                    Shown::Reminder {
                        task: event.task,
                        message: message.clone(),
                        color,
                        at: event.at,
                    }
                });
                (true, None)
            }
            Err(e) => {
                warn!(
                    task = %event.task,
                    sink = self.sink.sink_name(),
                    error = %e,
                    "reminder render failed"
                );
                (false, Some(e.to_string()))
            }
        };

        DispatchResult {
            task: event.task,
            message,
            color,
            fallback,
            success,
            error,
            duration_ms,
        }
    }

    /// Refresh the idle clock face. Returns whether the sink accepted it.
    pub fn show_idle(&mut self, now: &WallClockTime) -> bool {
        match self.sink.show_idle(now) {
            Ok(()) => {
                debug!(time = %now.hh_mm(), "idle face refreshed");
                self.last_shown = Some(Shown::Idle { at: *now });
                true
            }
            Err(e) => {
                warn!(sink = self.sink.sink_name(), error = %e, "idle refresh failed");
                false
            }
        }
    }

    /// Show the power-on pattern. Failures are logged only.
    pub fn show_startup(&mut self) {
        if let Err(e) = self.sink.show_startup() {
            warn!(sink = self.sink.sink_name(), error = %e, "startup pattern failed");
        }
    }

    /// What is currently visible, if anything has been shown.
    pub fn last_shown(&self) -> Option<&Shown> {
        self.last_shown.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
