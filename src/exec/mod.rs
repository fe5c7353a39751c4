// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `ProcessSpawner` trait and the production
//!   `TokioSpawner`; tests swap in a scripted spawner.
//! - [`executor`] runs a single command and routes its output to a log file
//!   and, unless quiet, to the console.
//! - [`sequencer`] runs an ordered command list with fail-fast semantics.
//! - [`console`] and [`highlight`] cover the user-facing console line.
//! - [`options`] holds `ExecOptions` and log path helpers.

pub mod backend;
pub mod console;
pub mod executor;
pub mod highlight;
pub mod options;
pub mod sequencer;

pub use backend::{Completion, OutputReader, ProcessSpawner, SpawnedProcess, TokioSpawner};
pub use console::{Console, StdConsole};
pub use executor::Executor;
pub use highlight::{CyanHighlighter, Highlighter, PlainHighlighter};
pub use options::{task_log_dir, ExecOptions, LOG_ROOT_DIR};
pub use sequencer::Sequencer;
