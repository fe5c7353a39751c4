use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use anyhow::anyhow;
use tokio::io::{AsyncRead, ReadBuf};
use bob_runner::errors::{BobError, Result};
use bob_runner::exec::{Console, ExecOptions, OutputReader, ProcessSpawner, SpawnedProcess};
use bob_runner::types::StreamKind;

/// How a scripted run ends.
#[derive(Debug, Clone, Default)]
pub enum FakeOutcome {
    #[default]
    Success,
    /// Completion resolves to an error whose message is exactly this text.
    Fail(String),
    /// Completion resolves to `CommandFailed` with this exit code.
    Exit(i32),
    /// `spawn` itself fails.
    SpawnError(String),
}

/// Output and outcome for one spawned command.
#[derive(Debug, Clone, Default)]
pub struct FakeRun {
    pub stdout: Vec<Vec<u8>>,
    pub stderr: Vec<Vec<u8>>,
    /// Read error raised on stdout once its chunks are used up.
    pub stdout_error: Option<String>,
    pub outcome: FakeOutcome,
}

impl FakeRun {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: FakeOutcome::Fail(message.to_string()),
            ..Self::default()
        }
    }

    pub fn stdout(mut self, chunk: impl Into<Vec<u8>>) -> Self {
        self.stdout.push(chunk.into());
        self
    }

    pub fn stderr(mut self, chunk: impl Into<Vec<u8>>) -> Self {
        self.stderr.push(chunk.into());
        self
    }

    pub fn stdout_error(mut self, message: &str) -> Self {
        self.stdout_error = Some(message.to_string());
        self
    }

    pub fn outcome(mut self, outcome: FakeOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

/// What the fake was asked to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnCall {
    pub command: String,
    pub options: ExecOptions,
}

/// A fake spawner that:
/// - records every spawn request with its options
/// - plays back scripted runs in order, then plain successes once the
///   script is exhausted.
#[derive(Debug, Clone, Default)]
pub struct FakeSpawner {
    script: Arc<Mutex<VecDeque<FakeRun>>>,
    calls: Arc<Mutex<Vec<SpawnCall>>>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runs(runs: impl IntoIterator<Item = FakeRun>) -> Self {
        let spawner = Self::default();
        spawner.script.lock().unwrap().extend(runs);
        spawner
    }

    pub fn calls(&self) -> Vec<SpawnCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(&self, command: &str, options: &ExecOptions) -> Result<SpawnedProcess> {
        self.calls.lock().unwrap().push(SpawnCall {
            command: command.to_string(),
            options: options.clone(),
        });

        let run = self.script.lock().unwrap().pop_front().unwrap_or_default();
        let command = command.to_string();

        let result = match run.outcome {
            FakeOutcome::Success => Ok(()),
            FakeOutcome::Fail(message) => Err(BobError::Other(anyhow!(message))),
            FakeOutcome::Exit(code) => Err(BobError::CommandFailed { command, code }),
            FakeOutcome::SpawnError(message) => {
                return Err(BobError::IoError(io::Error::new(
                    io::ErrorKind::NotFound,
                    message,
                )));
            }
        };

        Ok(SpawnedProcess {
            stdout: Some(Box::pin(
                ChunkReader::new(run.stdout).failing_with(run.stdout_error),
            ) as OutputReader),
            stderr: Some(Box::pin(ChunkReader::new(run.stderr)) as OutputReader),
            completion: Box::pin(async move { result }),
        })
    }
}

/// Async reader that hands out exactly one scripted chunk per read, then
/// either EOF or a single read error.
#[derive(Debug, Default)]
pub struct ChunkReader {
    chunks: VecDeque<Vec<u8>>,
    error: Option<String>,
}

impl ChunkReader {
    pub fn new(chunks: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            // An empty chunk would read as EOF.
            chunks: chunks.into_iter().filter(|c| !c.is_empty()).collect(),
            error: None,
        }
    }

    pub fn failing_with(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

impl AsyncRead for ChunkReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if let Some(mut chunk) = self.chunks.pop_front() {
            let n = chunk.len().min(buf.remaining());
            buf.put_slice(&chunk[..n]);
            if n < chunk.len() {
                let rest = chunk.split_off(n);
                self.chunks.push_front(rest);
            }
        } else if let Some(message) = self.error.take() {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, message)));
        }
        Poll::Ready(Ok(()))
    }
}

/// Console that records status lines and echoed chunks.
#[derive(Debug, Clone, Default)]
pub struct RecordingConsole {
    lines: Arc<Mutex<Vec<String>>>,
    echoes: Arc<Mutex<Vec<(StreamKind, Vec<u8>)>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn echoed(&self, stream: StreamKind) -> Vec<Vec<u8>> {
        self.echoes
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, bytes)| bytes.clone())
            .collect()
    }

    pub fn echo_count(&self) -> usize {
        self.echoes.lock().unwrap().len()
    }
}

impl Console for RecordingConsole {
    fn log_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn echo(&self, stream: StreamKind, chunk: &[u8]) -> io::Result<()> {
        self.echoes.lock().unwrap().push((stream, chunk.to_vec()));
        Ok(())
    }
}
