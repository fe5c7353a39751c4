// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::Path;
use std::pin::Pin;

use anyhow::{Context, Result};
use tokio::io::AsyncWrite;

pub mod mock;

/// Writable byte sink that receives a command's raw output.
pub type LogSink = Pin<Box<dyn AsyncWrite + Send>>;

/// Filesystem capabilities the executor and sequencer depend on.
pub trait FileSystem: Send + Sync + Debug {
    /// Create `path` and any missing parents. Must be idempotent.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Open a fresh (truncated) log sink at `path`.
    ///
    /// The parent directory is expected to exist already. Opening happens
    /// synchronously; writes go through the async sink.
    fn create_log_sink(&self, path: &Path) -> Result<LogSink>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn create_log_sink(&self, path: &Path) -> Result<LogSink> {
        let file = fs::File::create(path).with_context(|| format!("creating file {:?}", path))?;
        Ok(Box::pin(tokio::fs::File::from_std(file)))
    }
}
