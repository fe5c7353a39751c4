// src/exec/backend.rs

//! Pluggable process-spawning abstraction.
//!
//! The executor never touches `tokio::process` directly. It asks a
//! `ProcessSpawner` for a [`SpawnedProcess`]: two output readers plus a
//! completion future. This keeps the production spawner in one place and
//! lets tests script output chunks and exit outcomes without running any
//! real command.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::AsyncRead;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{BobError, Result};

use super::options::ExecOptions;

/// Boxed byte stream from one of the child's output pipes.
pub type OutputReader = Pin<Box<dyn AsyncRead + Send>>;

/// Resolves once the child has terminated.
///
/// `Ok(())` means success; any error is handed back to the caller as-is.
pub type Completion = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Live handle to a spawned command.
pub struct SpawnedProcess {
    pub stdout: Option<OutputReader>,
    pub stderr: Option<OutputReader>,
    pub completion: Completion,
}

impl std::fmt::Debug for SpawnedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnedProcess")
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .finish_non_exhaustive()
    }
}

/// Trait abstracting how shell commands are started.
///
/// Production code uses [`TokioSpawner`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ProcessSpawner: Send + Sync {
    /// Start `command` with the given options.
    ///
    /// Returning `Err` means the command could not be started at all; the
    /// error should name the command.
    fn spawn(&self, command: &str, options: &ExecOptions) -> Result<SpawnedProcess>;
}

/// Spawns commands through the platform shell with `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioSpawner;

impl TokioSpawner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessSpawner for TokioSpawner {
    fn spawn(&self, command: &str, options: &ExecOptions) -> Result<SpawnedProcess> {
        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(command);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(command);
            c
        };

        if let Some(cwd) = options.cwd.as_ref() {
            cmd.current_dir(cwd);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning process for command '{}'", command))?;
        debug!(cmd = %command, pid = ?child.id(), "spawned shell process");

        let stdout = child
            .stdout
            .take()
            .map(|s| Box::pin(s) as OutputReader);
        let stderr = child
            .stderr
            .take()
            .map(|s| Box::pin(s) as OutputReader);

        let command = command.to_string();
        let completion: Completion = Box::pin(async move {
            let status = child.wait().await?;
            let code = status.code().unwrap_or(-1);

            info!(
                cmd = %command,
                exit_code = code,
                success = status.success(),
                "process exited"
            );

            if status.success() {
                Ok(())
            } else {
                Err(BobError::CommandFailed { command, code })
            }
        });

        Ok(SpawnedProcess {
            stdout,
            stderr,
            completion,
        })
    }
}
