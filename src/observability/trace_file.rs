//! Append-only trace file with a single size-capped backup.
//!
//! Each call to [`TraceFile::append`] writes one line. When the file grows past its
//! size cap it is moved to `<path>.1` (replacing any earlier backup) and a fresh file
//! is started, so disk usage stays bounded at roughly twice the cap.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size cap before rotation (5 MB).
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Thread-safe line writer behind the span exporter.
///
/// # Rotation
///
/// Before each write the current file size is checked. Past `max_bytes`:
/// 1. The open handle is dropped
/// 2. `<path>` is renamed to `<path>.1`, replacing any earlier backup
/// 3. A fresh `<path>` is opened for the write
///
/// # Thread Safety
///
/// Appends are serialized by an internal `Mutex`, so one instance can be shared by
/// every exporter call.
pub struct TraceFile {
    /// Primary file.
    path: PathBuf,
    /// Size cap that triggers rotation.
    max_bytes: u64,
    /// Lazily opened on first append.
    handle: Mutex<Option<File>>,
}

impl TraceFile {
    /// Creates a writer for `path`. Nothing is opened until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_max_bytes(path, DEFAULT_MAX_BYTES)
    }

    /// Creates a writer for `path` rotating past `max_bytes` instead of
    /// [`DEFAULT_MAX_BYTES`].
    ///
    /// # Parameters
    ///
    /// * `path` - Primary file; its parent directory is created on first append
    /// * `max_bytes` - Size above which the next append rotates first
    pub fn with_max_bytes(path: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            path: path.into(),
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    /// Path of the primary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the rotated backup.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".1");
        PathBuf::from(name)
    }

    /// Appends `line` followed by a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be rotated, opened or written, or if the lock is
    /// poisoned.
    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes) {
            *handle = None;
            fs::rename(&self.path, self.backup_path())?;
        }

        if handle.is_none() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;
        writeln!(file, "{line}")?;
        file.flush()
    }
}

impl std::fmt::Debug for TraceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
