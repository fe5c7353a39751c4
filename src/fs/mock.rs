// src/fs/mock.rs

use super::{FileSystem, LogSink};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem that records every directory and log sink request.
///
/// Directories must be created (or pre-seeded) before a sink can be opened
/// inside them, just like on a real disk.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    dir_requests: Arc<Mutex<Vec<PathBuf>>>,
    sink_requests: Arc<Mutex<Vec<PathBuf>>>,
    read_only: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        // Ensure root exists
        fs.add_dir(".");
        fs
    }

    /// Pre-seed a directory (and its parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.lock().unwrap();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    /// Make `create_dir_all` and `create_log_sink` fail for anything at or
    /// below `path`.
    pub fn deny_writes_under(&self, path: impl AsRef<Path>) {
        self.read_only
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    /// Contents written so far to the file at `path`.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.files.lock().unwrap().get(path.as_ref()) {
            Some(MockEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    pub fn contents_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(
            self.files.lock().unwrap().get(path.as_ref()),
            Some(MockEntry::Dir)
        )
    }

    /// Every path passed to `create_dir_all`, in call order.
    pub fn dir_requests(&self) -> Vec<PathBuf> {
        self.dir_requests.lock().unwrap().clone()
    }

    /// Every path passed to `create_log_sink`, in call order.
    pub fn sink_requests(&self) -> Vec<PathBuf> {
        self.sink_requests.lock().unwrap().clone()
    }

    fn is_denied(&self, path: &Path) -> bool {
        self.read_only
            .lock()
            .unwrap()
            .iter()
            .any(|denied| path.starts_with(denied))
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = Some(path);
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            files
                .entry(dir.to_path_buf())
                .or_insert(MockEntry::Dir);
            current = dir.parent();
        }
    }
}

impl FileSystem for MockFileSystem {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.dir_requests.lock().unwrap().push(path.to_path_buf());
        if self.is_denied(path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        let mut files = self.files.lock().unwrap();
        if let Some(MockEntry::File(_)) = files.get(path) {
            return Err(anyhow!("Not a directory: {:?}", path));
        }
        Self::ensure_dir_entry(&mut files, path);
        Ok(())
    }

    fn create_log_sink(&self, path: &Path) -> Result<LogSink> {
        self.sink_requests.lock().unwrap().push(path.to_path_buf());
        if self.is_denied(path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        let mut files = self.files.lock().unwrap();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !matches!(files.get(parent), Some(MockEntry::Dir)) {
            return Err(anyhow!("No such directory: {:?}", parent));
        }
        if let Some(MockEntry::Dir) = files.get(path) {
            return Err(anyhow!("Is a directory: {:?}", path));
        }
        files.insert(path.to_path_buf(), MockEntry::File(Vec::new()));

        Ok(Box::pin(MockSink {
            files: Arc::clone(&self.files),
            path: path.to_path_buf(),
        }))
    }
}

/// Sink handed out by [`MockFileSystem`]; appends into the shared map.
struct MockSink {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    path: PathBuf,
}

impl AsyncWrite for MockSink {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let mut files = self.files.lock().unwrap();
        let result = match files.get_mut(&self.path) {
            Some(MockEntry::File(content)) => {
                content.extend_from_slice(buf);
                Ok(buf.len())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file vanished: {:?}", self.path),
            )),
        };
        Poll::Ready(result)
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
