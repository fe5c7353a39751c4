// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::exec::{
    CyanHighlighter, ExecOptions, Executor, Highlighter, PlainHighlighter, Sequencer,
    StdConsole, TokioSpawner, task_log_dir,
};
use crate::fs::RealFileSystem;
use crate::types::Command;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and task expansion
/// - the real spawner, filesystem and console
/// - the sequencer that runs everything in order
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let commands = cfg.commands_for(args.tasks.as_slice())?;
    let cwd = match args.cwd.as_ref() {
        Some(dir) => PathBuf::from(dir),
        None => config_root_dir(&config_path),
    };
    let options = ExecOptions::new()
        .with_cwd(cwd.clone())
        .quiet(args.quiet || cfg.config.quiet);

    if args.dry_run {
        print_plan(&commands, &cwd);
        return Ok(());
    }

    let highlighter: Arc<dyn Highlighter> =
        if !args.no_color && std::io::stdout().is_terminal() {
            Arc::new(CyanHighlighter)
        } else {
            Arc::new(PlainHighlighter)
        };

    let executor = Executor::new(
        Arc::new(TokioSpawner::new()),
        Arc::new(RealFileSystem),
        Arc::new(StdConsole),
    )
    .with_highlighter(highlighter);

    info!(tasks = ?args.tasks, commands = commands.len(), cwd = %cwd.display(), "running tasks");
    Sequencer::new(executor)
        .exec_series(&commands, &options)
        .await?;
    Ok(())
}

/// Figure out the project root.
///
/// - If the config path has a non-empty parent (e.g. "project/bob.toml"),
///   we use that directory.
/// - If it's just a bare filename like "bob.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Dry-run output: each command and where its log would go.
fn print_plan(commands: &[Command], cwd: &Path) {
    println!("bob dry-run (cwd: {})", cwd.display());
    for command in commands {
        let log = task_log_dir(cwd, &command.meta.task).join(format!("{}.out", command.meta.kind));
        println!("  - {} | {}", command.meta.task, command.exec);
        println!("      log: {}", log.display());
    }

    debug!("dry-run complete (no execution)");
}
