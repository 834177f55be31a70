//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL around one worker's event logger.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use evlog_core::test_support::{conf, worker_identity};
use evlog_core::{ConfMap, Event, EventLogger, WorkerIdentity};
use evlog_storage::{create_event_logger, FLUSH_INTERVAL_KEY};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 2000;

/// Poll `condition` until it holds or `SPEC_WAIT_MAX_MS` elapses.
pub fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(SPEC_WAIT_MAX_MS);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(SPEC_POLL_INTERVAL_MS));
    }
    condition()
}

/// One worker with its own artifact root and event logger.
pub struct Worker {
    pub logger: Box<dyn EventLogger>,
    pub identity: WorkerIdentity,
    // Dropped last so the logger closes before the directory goes away.
    dir: TempDir,
}

impl Worker {
    /// Prepared worker with default runtime config and arguments.
    pub fn start() -> Self {
        Self::start_with(&conf(&[]), &conf(&[]))
    }

    /// Prepared worker flushing every `ms` milliseconds.
    pub fn start_flushing_every(ms: u64) -> Self {
        Self::start_with(&conf(&[]), &conf(&[(FLUSH_INTERVAL_KEY, ms.into())]))
    }

    pub fn start_with(runtime_conf: &ConfMap, arguments: &ConfMap) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let identity = worker_identity(&dir.path().join("wid"));
        let mut logger = create_event_logger(runtime_conf).unwrap();
        logger.prepare(runtime_conf, arguments, &identity).unwrap();
        Self {
            logger,
            identity,
            dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn log(&self, event: &Event) {
        self.logger.log(event).unwrap();
    }

    pub fn close(&mut self) {
        self.logger.close();
    }

    pub fn events_log(&self) -> PathBuf {
        self.identity.artifact_root.join("events.log")
    }

    /// Current contents of `events.log`, read through a fresh handle.
    pub fn read_log(&self) -> String {
        std::fs::read_to_string(self.events_log()).unwrap_or_default()
    }
}
