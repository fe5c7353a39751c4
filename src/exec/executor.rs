// src/exec/executor.rs

//! Single-command execution with output capture.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{BobError, Result};
use crate::fs::{FileSystem, LogSink};
use crate::types::StreamKind;

use super::backend::{OutputReader, ProcessSpawner, SpawnedProcess};
use super::console::Console;
use super::highlight::{Highlighter, PlainHighlighter};
use super::options::ExecOptions;

const READ_BUF_SIZE: usize = 8 * 1024;
const CHUNK_CHANNEL_CAPACITY: usize = 64;

/// One read from a child's stdout or stderr.
#[derive(Debug)]
struct OutputChunk {
    stream: StreamKind,
    bytes: Vec<u8>,
}

/// Runs one shell command, logging its output to `<dir>/<type>.out` and
/// echoing it live unless `quiet` is set.
#[derive(Clone)]
pub struct Executor {
    spawner: Arc<dyn ProcessSpawner>,
    fs: Arc<dyn FileSystem>,
    console: Arc<dyn Console>,
    highlighter: Arc<dyn Highlighter>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(
        spawner: Arc<dyn ProcessSpawner>,
        fs: Arc<dyn FileSystem>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            spawner,
            fs,
            console,
            highlighter: Arc::new(PlainHighlighter),
        }
    }

    pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub(crate) fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Run `command` to completion.
    ///
    /// `options.dir`, `options.task` and `options.kind` must be set and
    /// `dir` must already exist. The options are forwarded to the spawner
    /// unchanged. Whatever error the spawner's completion produces is
    /// returned as-is.
    pub async fn exec(&self, command: &str, options: &ExecOptions) -> Result<()> {
        let task = options
            .task
            .as_deref()
            .ok_or(BobError::MissingOption("task"))?;
        let log_path = options.log_path()?;

        self.console.log_line(&format!(
            "{} | {}",
            self.highlighter.task_label(task),
            command
        ));

        let mut sink = self
            .fs
            .create_log_sink(&log_path)
            .map_err(|source| BobError::Prepare {
                path: log_path.clone(),
                source,
            })?;

        let SpawnedProcess {
            stdout,
            stderr,
            completion,
        } = self.spawner.spawn(command, options)?;

        debug!(task, cmd = %command, log = %log_path.display(), "command started");

        let (tx, rx) = mpsc::channel::<OutputChunk>(CHUNK_CHANNEL_CAPACITY);
        let (read_out, read_err, written, outcome) = tokio::join!(
            pump(stdout, StreamKind::Stdout, tx.clone()),
            pump(stderr, StreamKind::Stderr, tx),
            self.drain(rx, &mut sink, options.quiet),
            completion,
        );

        if let Err(err) = outcome {
            warn!(task, cmd = %command, error = %err, "command failed");
            return Err(err);
        }
        // Output must reach the log in full.
        for res in [read_out, read_err, written] {
            if let Err(e) = res {
                warn!(task, cmd = %command, error = %e, "command output incomplete");
                return Err(e.into());
            }
        }

        info!(task, cmd = %command, "command finished");
        Ok(())
    }

    /// Write every chunk to the log sink, and echo it unless quiet, in
    /// arrival order.
    async fn drain(
        &self,
        mut rx: mpsc::Receiver<OutputChunk>,
        sink: &mut LogSink,
        quiet: bool,
    ) -> io::Result<()> {
        let mut result = Ok(());

        while let Some(chunk) = rx.recv().await {
            // Keep receiving after a sink error so the child never stalls on
            // a full pipe.
            if result.is_err() {
                continue;
            }
            result = sink.write_all(&chunk.bytes).await;

            if !quiet {
                if let Err(e) = self.console.echo(chunk.stream, &chunk.bytes) {
                    debug!(stream = %chunk.stream, error = %e, "live echo failed");
                }
            }
        }

        result?;
        sink.flush().await
    }
}

/// Forward one pipe into the chunk channel until EOF.
///
/// A read error ends the pump and is returned, tagged with the stream.
async fn pump(
    reader: Option<OutputReader>,
    stream: StreamKind,
    tx: mpsc::Sender<OutputChunk>,
) -> io::Result<()> {
    let Some(mut reader) = reader else {
        return Ok(());
    };
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = OutputChunk {
                    stream,
                    bytes: buf[..n].to_vec(),
                };
                if tx.send(chunk).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(%stream, error = %e, "reading command output failed");
                return Err(io::Error::new(e.kind(), format!("reading {stream}: {e}")));
            }
        }
    }

    Ok(())
}
