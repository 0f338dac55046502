//! Reminder file loading: read, parse, validate.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::rule_set::ReminderRuleSet;
use crate::schema::{ReminderRule, TaskDisplay, TaskId};

use super::error::{Result, RuleError};

/// On-disk shape of a reminder file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReminderFile {
    rules: Vec<ReminderRule>,
    #[serde(default)]
    tasks: Option<BTreeMap<TaskId, TaskDisplay>>,
}

/// A validated reminder file.
#[derive(Debug, Clone)]
pub struct ReminderFile {
    pub rules: ReminderRuleSet,
    /// Display entries declared by the file. `None` when the file has no
    /// `tasks` section at all; a present but partial map is kept as is.
    pub tasks: Option<BTreeMap<TaskId, TaskDisplay>>,
}

/// Parse and validate reminder YAML.
pub fn parse_reminder_yaml(yaml: &str) -> Result<ReminderFile> {
    let raw: RawReminderFile = serde_yaml::from_str(yaml)?;
    let rules = ReminderRuleSet::new(raw.rules)?;
    Ok(ReminderFile {
        rules,
        tasks: raw.tasks,
    })
}

/// Read, parse and validate a reminder file.
///
/// Any failure is fatal for the caller: there is no partially loaded state.
pub fn load_reminder_file(path: &Path) -> Result<ReminderFile> {
    let contents = fs::read_to_string(path).map_err(|source| RuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = parse_reminder_yaml(&contents)?;
    info!(
        path = %path.display(),
        rules = file.rules.len(),
        tasks = file.tasks.as_ref().map_or(0, BTreeMap::len),
        "loaded reminder file"
    );
    Ok(file)
}
