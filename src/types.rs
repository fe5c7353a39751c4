use std::fmt;

/// Task/type labels attached to a command.
///
/// `task` groups commands (e.g. `lint`, `test`) and names their log
/// directory; `kind` names the tool producing the output (e.g. `jshint`)
/// and therefore the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMeta {
    pub task: String,
    pub kind: String,
}

/// One shell invocation plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub meta: CommandMeta,
    pub exec: String,
}

impl Command {
    pub fn new(task: impl Into<String>, kind: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            meta: CommandMeta {
                task: task.into(),
                kind: kind.into(),
            },
            exec: exec.into(),
        }
    }
}

/// Which of the child's output pipes a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}
