#![allow(dead_code)]

use std::sync::Arc;

use bob_runner::exec::{Executor, Highlighter, Sequencer};
use bob_runner::fs::mock::MockFileSystem;
use bob_runner::types::Command;

use crate::fake_spawner::{FakeRun, FakeSpawner, RecordingConsole};

/// Fake spawner, mock filesystem and recording console wired into an
/// `Executor`/`Sequencer`, with handles kept for assertions.
pub struct Harness {
    pub spawner: FakeSpawner,
    pub fs: MockFileSystem,
    pub console: RecordingConsole,
    highlighter: Option<Arc<dyn Highlighter>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_runs(Vec::new())
    }

    pub fn with_runs(runs: impl IntoIterator<Item = FakeRun>) -> Self {
        Self {
            spawner: FakeSpawner::with_runs(runs),
            fs: MockFileSystem::new(),
            console: RecordingConsole::new(),
            highlighter: None,
        }
    }

    pub fn highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn executor(&self) -> Executor {
        let executor = Executor::new(
            Arc::new(self.spawner.clone()),
            Arc::new(self.fs.clone()),
            Arc::new(self.console.clone()),
        );
        match self.highlighter.as_ref() {
            Some(h) => executor.with_highlighter(Arc::clone(h)),
            None => executor,
        }
    }

    pub fn sequencer(&self) -> Sequencer {
        Sequencer::new(self.executor())
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ordered command lists.
#[derive(Debug, Default)]
pub struct CommandListBuilder {
    commands: Vec<Command>,
}

impl CommandListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(mut self, task: &str, kind: &str, exec: &str) -> Self {
        self.commands.push(Command::new(task, kind, exec));
        self
    }

    pub fn build(self) -> Vec<Command> {
        self.commands
    }
}
