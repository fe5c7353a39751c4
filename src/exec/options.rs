// src/exec/options.rs

use std::path::{Path, PathBuf};

use crate::errors::{BobError, Result};
use crate::types::Command;

/// Name of the per-project directory that holds task logs.
pub const LOG_ROOT_DIR: &str = ".bob";

/// Options shared by the executor, the sequencer and the process spawner.
///
/// The same value is handed to [`ProcessSpawner::spawn`] untouched, so
/// everything set here (notably `cwd`) reaches the child process.
///
/// [`ProcessSpawner::spawn`]: crate::exec::ProcessSpawner::spawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Working directory for the spawned command.
    pub cwd: Option<PathBuf>,
    /// Directory that receives `<kind>.out`.
    pub dir: Option<PathBuf>,
    /// Task label printed on the console line.
    pub task: Option<String>,
    /// Tool name; selects the log file name.
    pub kind: Option<String>,
    /// Suppress live echo of command output.
    pub quiet: bool,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Copy of `self` with the command's task, kind and log dir applied.
    /// `cwd` and `quiet` are carried over as-is.
    pub fn for_command(&self, command: &Command, dir: PathBuf) -> Self {
        Self {
            task: Some(command.meta.task.clone()),
            kind: Some(command.meta.kind.clone()),
            dir: Some(dir),
            ..self.clone()
        }
    }

    /// `<dir>/<kind>.out`
    pub fn log_path(&self) -> Result<PathBuf> {
        let dir = self.dir.as_ref().ok_or(BobError::MissingOption("dir"))?;
        let kind = self.kind.as_ref().ok_or(BobError::MissingOption("type"))?;
        Ok(dir.join(format!("{kind}.out")))
    }
}

/// `<cwd>/.bob/<task>`
pub fn task_log_dir(cwd: &Path, task: &str) -> PathBuf {
    cwd.join(LOG_ROOT_DIR).join(task)
}
