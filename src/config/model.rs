// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{BobError, Result};
use crate::types::Command;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// quiet = false
///
/// [[task.lint]]
/// type = "jshint"
/// exec = "jshint lib/ test/"
///
/// [[task.test]]
/// type = "buster"
/// exec = "buster-test"
/// ```
///
/// This is the unvalidated form; see [`ConfigFile`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Commands per task, in the order they should run.
    #[serde(default)]
    pub task: BTreeMap<String, Vec<CommandConfig>>,
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Default quiet mode; `--quiet` on the CLI forces it on.
    #[serde(default)]
    pub quiet: bool,
}

/// One `[[task.<name>]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    /// Tool name; becomes `<type>.out`.
    #[serde(rename = "type")]
    pub kind: String,
    pub exec: String,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: BTreeMap<String, Vec<CommandConfig>>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        task: BTreeMap<String, Vec<CommandConfig>>,
    ) -> Self {
        Self { config, task }
    }

    /// Expand task names into the flat, ordered command list.
    ///
    /// Tasks run in the order requested; commands within a task keep their
    /// file order. Requesting the same task twice runs it twice.
    pub fn commands_for<S: AsRef<str>>(&self, tasks: &[S]) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        for name in tasks {
            let name = name.as_ref();
            let entries = self
                .task
                .get(name)
                .ok_or_else(|| BobError::TaskNotFound(name.to_string()))?;
            commands.extend(
                entries
                    .iter()
                    .map(|entry| Command::new(name, &entry.kind, &entry.exec)),
            );
        }
        Ok(commands)
    }
}
