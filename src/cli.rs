// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;

/// Command-line arguments for `bob`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bob",
    version,
    about = "Run project tasks as ordered shell commands, logging output under .bob/.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to run, in order (e.g. `lint test`).
    #[arg(required = true, value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Path to the config file (TOML).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Working directory for commands and for the `.bob/` log tree.
    ///
    /// Default: the directory containing the config file.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<String>,

    /// Only write command output to the log files; don't echo it.
    #[arg(long, short)]
    pub quiet: bool,

    /// Don't colour the task label.
    #[arg(long)]
    pub no_color: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BOB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the commands and their log files without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
