// src/exec/sequencer.rs

//! Ordered, fail-fast execution of a command list.

use tracing::{debug, info, warn};

use crate::errors::{BobError, Result};
use crate::types::Command;

use super::executor::Executor;
use super::options::{task_log_dir, ExecOptions};

/// Runs commands one at a time through an [`Executor`], stopping at the
/// first failure.
#[derive(Debug, Clone)]
pub struct Sequencer {
    executor: Executor,
}

impl Sequencer {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Run `commands` in order.
    ///
    /// Each command logs to `<cwd>/.bob/<task>/<type>.out`; the directory
    /// is (re)created right before the command starts. Any caller-supplied
    /// `dir`, `task` or `kind` in `options` is replaced per command. The
    /// first error is returned unchanged and later commands never start.
    pub async fn exec_series(&self, commands: &[Command], options: &ExecOptions) -> Result<()> {
        if commands.is_empty() {
            debug!("no commands to run");
            return Ok(());
        }

        let cwd = options
            .cwd
            .as_deref()
            .ok_or(BobError::MissingOption("cwd"))?;

        for (index, command) in commands.iter().enumerate() {
            let dir = task_log_dir(cwd, &command.meta.task);

            self.executor
                .file_system()
                .create_dir_all(&dir)
                .map_err(|source| BobError::Prepare {
                    path: dir.clone(),
                    source,
                })?;

            let merged = options.for_command(command, dir);

            if let Err(err) = self.executor.exec(&command.exec, &merged).await {
                warn!(
                    task = %command.meta.task,
                    kind = %command.meta.kind,
                    skipped = commands.len() - index - 1,
                    "stopping series after failed command"
                );
                return Err(err);
            }
        }

        info!(count = commands.len(), "all commands succeeded");
        Ok(())
    }
}
