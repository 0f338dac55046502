//! Minijinja template rendering for reminder messages.
//!
//! Messages may reference the firing task and the time it fired, e.g.
//! `"It's {{ time }}, time for lunch!"`. Plain strings render unchanged.
//!
//! Templates are arbitrary strings from the reminder file, so a fresh
//! [`minijinja::Environment`] is created per render call.

use minijinja::UndefinedBehavior;
use serde::Serialize;

use helping_rules::FireEvent;

use crate::traits::RenderError;

/// Variables available to message templates.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// Task name, e.g. `"feet_up"`.
    pub task: String,
    /// Fire time as `HH:MM`.
    pub time: String,
    pub hour: u8,
    pub minute: u8,
}

impl TemplateContext {
    pub fn for_event(event: &FireEvent) -> Self {
        Self {
            task: event.task.to_string(),
            time: event.at.hh_mm(),
            hour: event.at.hour(),
            minute: event.at.minute(),
        }
    }
}

/// Renders message templates using minijinja.
#[derive(Debug, Default)]
pub struct TemplateRenderer {
    _private: (),
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Strict undefined: a misspelled variable is a render error.
    fn build_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("twelve_hour", twelve_hour_filter);
        env
    }

    /// Render a template string with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template is invalid or
    /// references an unknown variable.
    pub fn render(&self, template_str: &str, ctx: &TemplateContext) -> Result<String, RenderError> {
        let env = Self::build_env();
        env.render_str(template_str, ctx)
            .map_err(|e| RenderError::Template(e.to_string()))
    }

    /// Check that a template string parses. Does not evaluate it.
    pub fn validate(&self, template_str: &str) -> Result<(), RenderError> {
        let env = Self::build_env();
        env.template_from_str(template_str)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        Ok(())
    }
}

/// Custom filter: `13` → `"1 PM"`, `0` → `"12 AM"`.
fn twelve_hour_filter(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h} {suffix}")
}
