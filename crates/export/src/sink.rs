//! Export destinations.
//!
//! A sink receives a fully rendered document in one call. Renderers never
//! write to a sink directly, so a failed render leaves the destination as it
//! was.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// Where committed bytes ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Path(PathBuf),
    Memory,
    Stream,
}

impl core::fmt::Display for Destination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Destination::Path(path) => write!(f, "{}", path.display()),
            Destination::Memory => f.write_str("memory"),
            Destination::Stream => f.write_str("stream"),
        }
    }
}

/// Trait for export destinations
pub trait Sink {
    /// Commit a complete document.
    fn commit(&mut self, bytes: &[u8]) -> io::Result<Destination>;
}

/// Keeps the committed document in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Committed bytes as text; every renderer emits UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buffer).ok()
    }
}

impl Sink for MemorySink {
    fn commit(&mut self, bytes: &[u8]) -> io::Result<Destination> {
        self.buffer.clear();
        self.buffer.extend_from_slice(bytes);
        Ok(Destination::Memory)
    }
}

/// Writes to a file through a uniquely named sibling temporary file and a
/// rename, so readers see either the previous file or the complete new one.
/// Concurrent commits to the same path never share a temporary file; the last
/// rename wins.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// `.<file name>.<random>.tmp` next to the destination.
    fn temp_file(&self) -> io::Result<NamedTempFile> {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".to_string());
        tempfile::Builder::new()
            .prefix(&format!(".{name}."))
            .suffix(".tmp")
            .tempfile_in(self.parent())
    }
}

impl Sink for FileSink {
    fn commit(&mut self, bytes: &[u8]) -> io::Result<Destination> {
        fs::create_dir_all(self.parent())?;

        // Dropping the temp file on any error path removes it.
        let mut temp = self.temp_file()?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "file committed");
        Ok(Destination::Path(self.path.clone()))
    }
}

/// Writes the whole document to any stream and flushes it.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn commit(&mut self, bytes: &[u8]) -> io::Result<Destination> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(Destination::Stream)
    }
}
