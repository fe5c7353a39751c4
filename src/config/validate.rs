// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BobError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = BobError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_tasks(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(BobError::ConfigError(
            "config must contain at least one [[task.<name>]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_tasks(cfg: &RawConfigFile) -> Result<()> {
    for (name, commands) in cfg.task.iter() {
        ensure_path_component("task name", name)?;

        if commands.is_empty() {
            return Err(BobError::ConfigError(format!(
                "task '{}' has no commands",
                name
            )));
        }

        let mut seen = HashSet::new();
        for command in commands {
            ensure_path_component(&format!("type in task '{}'", name), &command.kind)?;

            if command.exec.trim().is_empty() {
                return Err(BobError::ConfigError(format!(
                    "task '{}' type '{}' has an empty `exec`",
                    name, command.kind
                )));
            }

            // Two commands with the same type would share one log file.
            if !seen.insert(command.kind.as_str()) {
                return Err(BobError::ConfigError(format!(
                    "task '{}' lists type '{}' more than once",
                    name, command.kind
                )));
            }
        }
    }
    Ok(())
}

/// Task names and types end up as path components under `.bob/`.
fn ensure_path_component(what: &str, value: &str) -> Result<()> {
    let bad = value.trim().is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\']);

    if bad {
        return Err(BobError::ConfigError(format!(
            "invalid {}: '{}' (must be a plain, non-empty file name)",
            what, value
        )));
    }
    Ok(())
}
