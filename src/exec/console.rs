// src/exec/console.rs

use std::io::{self, Write};

use crate::types::StreamKind;

/// Where the executor reports progress and echoes live output.
pub trait Console: Send + Sync {
    /// Print one status line (newline appended by the implementation).
    fn log_line(&self, line: &str);

    /// Forward a raw output chunk to the matching standard stream.
    fn echo(&self, stream: StreamKind, chunk: &[u8]) -> io::Result<()>;
}

/// Console backed by this process's own stdout/stderr.
#[derive(Debug, Clone, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn log_line(&self, line: &str) {
        println!("{line}");
    }

    fn echo(&self, stream: StreamKind, chunk: &[u8]) -> io::Result<()> {
        match stream {
            StreamKind::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(chunk)?;
                out.flush()
            }
            StreamKind::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(chunk)?;
                err.flush()
            }
        }
    }
}
