// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered append-only line writer.
//!
//! Lines go to an in-memory buffer and reach the sink only when flushed.
//! The `dirty` flag records whether anything was appended since the last
//! successful flush, so the periodic flush can skip idle intervals without
//! taking the writer lock.
//!
//! Appends and flushes are serialized by one lock, and `dirty` is only
//! written while that lock is held: set after an append, cleared after a
//! flush. A flush therefore never clears the flag for a line it did not
//! write out.

use evlog_core::EventLogError;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Destination of a [`LogWriter`].
///
/// Abstracts the file so tests can inject write, flush and sync failures.
pub trait LogSink: Write + Send + 'static {
    /// Make written bytes durable on storage.
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogSink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Line-oriented buffered writer shared between loggers and the flush thread.
pub struct LogWriter<S: LogSink = File> {
    path: PathBuf,
    /// `None` once closed
    inner: Mutex<Option<BufWriter<S>>>,
    dirty: AtomicBool,
}

impl LogWriter<File> {
    /// Open `path` for appending, creating the file and any missing parent
    /// directories. Existing content is never truncated.
    pub fn open(path: &Path, buffer_bytes: usize) -> Result<Self, EventLogError> {
        let setup = |source| EventLogError::Setup {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(setup)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(setup)?;

        Ok(Self::with_sink(path, file, buffer_bytes))
    }
}

impl<S: LogSink> LogWriter<S> {
    /// Wrap an already-open sink. `path` is only used in diagnostics.
    pub fn with_sink(path: impl Into<PathBuf>, sink: S, buffer_bytes: usize) -> Self {
        Self {
            path: path.into(),
            inner: Mutex::new(Some(BufWriter::with_capacity(buffer_bytes, sink))),
            dirty: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether lines were appended since the last successful flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().is_none()
    }

    /// Append `line` plus a newline terminator.
    ///
    /// Embedded `\r` and `\n` are written as the two-character sequences
    /// `\\r` and `\\n` so the line stays one physical line. Backslashes are
    /// written unchanged, so already-escaped lines (JSON) pass through as-is
    /// and the escaping is not reversible: a raw newline and a literal
    /// backslash-n produce the same bytes.
    ///
    /// The line is buffered, not yet written to the sink. On error none of
    /// it is left in the buffer.
    pub fn append_line(&self, line: &str) -> Result<(), EventLogError> {
        let mut guard = self.inner.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| self.write_error(io::Error::other("event log writer is closed")))?;

        write_line(writer, line).map_err(|source| self.write_error(source))?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    /// Flush buffered lines if anything was appended since the last flush.
    ///
    /// Returns whether a flush was performed.
    pub fn flush_if_dirty(&self) -> io::Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    /// Flush buffered lines to the sink and clear the dirty flag.
    pub fn flush(&self) -> io::Result<()> {
        let mut guard = self.inner.lock();
        if let Some(writer) = guard.as_mut() {
            writer.flush()?;
        }
        self.dirty.store(false, Ordering::Release);
        Ok(())
    }

    /// Flush, sync and release the sink.
    ///
    /// Waits for the writer lock until `deadline` at most, so a wedged flush
    /// cannot block the caller indefinitely. The sink is released even when
    /// flushing or syncing fails. Closing an already closed writer is a no-op.
    pub fn close(&self, deadline: Instant) -> Result<(), EventLogError> {
        let mut guard = self.inner.try_lock_until(deadline).ok_or_else(|| {
            self.close_error(io::Error::new(
                io::ErrorKind::TimedOut,
                "event log writer is busy",
            ))
        })?;

        let Some(mut writer) = guard.take() else {
            return Ok(());
        };

        let result = writer.flush().and_then(|()| writer.get_mut().sync());
        drop(writer);

        match result {
            Ok(()) => {
                self.dirty.store(false, Ordering::Release);
                Ok(())
            }
            Err(source) => Err(self.close_error(source)),
        }
    }

    fn write_error(&self, source: io::Error) -> EventLogError {
        EventLogError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn close_error(&self, source: io::Error) -> EventLogError {
        EventLogError::Close {
            path: self.path.clone(),
            source,
        }
    }
}

/// Write `line` and its terminator with a single `write_all`, so a failed
/// append leaves none of the line in the buffer.
fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    let mut bytes = Vec::with_capacity(line.len() + 1);
    if line.contains(|c: char| c == '\n' || c == '\r') {
        bytes.extend_from_slice(line.replace('\r', "\\r").replace('\n', "\\n").as_bytes());
    } else {
        bytes.extend_from_slice(line.as_bytes());
    }
    bytes.push(b'\n');
    writer.write_all(&bytes)
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
