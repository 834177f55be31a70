// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed event logger.
//!
//! Writes one line per event to `<artifact root>/events.log`. Lines are
//! buffered in memory; a background thread flushes them about once per flush
//! interval, and `close` flushes and syncs whatever is left. Up to one flush
//! interval of events may be lost if the process dies without closing.

use crate::{FileLoggerConfig, FlushScheduler, FlushTaskExit, LogSink, LogWriter};
use evlog_core::{
    ConfMap, Event, EventFormatter, EventLogError, EventLogger, LoggerPhase, WorkerIdentity,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// File name of the event log inside a worker's artifact root.
pub const EVENT_LOG_FILE_NAME: &str = "events.log";

/// Extra time `close` allows for taking the writer lock after the grace period.
const CLOSE_LOCK_SLACK: Duration = Duration::from_millis(100);

/// Location of the event log for `identity`.
pub fn event_log_path(identity: &WorkerIdentity) -> PathBuf {
    identity.artifact_root().join(EVENT_LOG_FILE_NAME)
}

/// What happened while shutting down an [`ActiveLog`].
#[derive(Debug)]
struct ShutdownReport {
    flush_task: FlushTaskExit,
    close: Result<(), EventLogError>,
}

/// Writer plus flush thread for one prepare..close cycle.
struct ActiveLog<S: LogSink> {
    writer: Arc<LogWriter<S>>,
    scheduler: FlushScheduler,
    shutdown_grace: Duration,
}

impl<S: LogSink> ActiveLog<S> {
    fn start(writer: LogWriter<S>, config: &FileLoggerConfig) -> Result<Self, EventLogError> {
        let writer = Arc::new(writer);
        let scheduler = FlushScheduler::start(Arc::clone(&writer), config.flush_interval)
            .map_err(|source| EventLogError::Setup {
                path: writer.path().to_owned(),
                source,
            })?;

        Ok(Self {
            writer,
            scheduler,
            shutdown_grace: config.shutdown_grace,
        })
    }

    /// Stop the flush thread, then flush, sync and release the sink.
    ///
    /// Both steps share one deadline, so this returns within the grace period
    /// plus a small slack even if the flush thread is wedged.
    fn shutdown(self) -> ShutdownReport {
        let deadline = Instant::now() + self.shutdown_grace;
        let flush_task = self.scheduler.shutdown(deadline);
        let close = self.writer.close(deadline + CLOSE_LOCK_SLACK);
        ShutdownReport { flush_task, close }
    }
}

enum State {
    Created,
    Prepared(ActiveLog<File>),
    Closed,
}

/// Event logger appending to `events.log` under the worker's artifact root.
pub struct FileEventLogger {
    state: State,
    /// Installed at construction (custom) or at prepare (from arguments)
    formatter: Option<Arc<dyn EventFormatter>>,
    path: Option<PathBuf>,
}

impl Default for FileEventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl FileEventLogger {
    pub fn new() -> Self {
        Self {
            state: State::Created,
            formatter: None,
            path: None,
        }
    }

    /// Render events with `formatter` instead of the configured line format.
    pub fn with_formatter(mut self, formatter: impl EventFormatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn phase(&self) -> LoggerPhase {
        match self.state {
            State::Created => LoggerPhase::Created,
            State::Prepared(_) => LoggerPhase::Prepared,
            State::Closed => LoggerPhase::Closed,
        }
    }

    /// Path of the event log, once prepared.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether events were logged since the last successful flush.
    pub fn is_dirty(&self) -> bool {
        match &self.state {
            State::Prepared(active) => active.writer.is_dirty(),
            State::Created | State::Closed => false,
        }
    }

    /// Whether the background flush thread is alive. Turns false after a
    /// scheduled flush fails.
    pub fn is_flush_task_running(&self) -> bool {
        match &self.state {
            State::Prepared(active) => active.scheduler.is_running(),
            State::Created | State::Closed => false,
        }
    }
}

impl EventLogger for FileEventLogger {
    fn prepare(
        &mut self,
        _conf: &ConfMap,
        arguments: &ConfMap,
        identity: &WorkerIdentity,
    ) -> Result<(), EventLogError> {
        self.phase().require(LoggerPhase::Created, "prepare")?;

        let config = FileLoggerConfig::from_arguments(arguments)?;
        let path = event_log_path(identity);
        info!(path = %path.display(), worker = %identity, "opening event log");

        let active = LogWriter::open(&path, config.buffer_bytes)
            .and_then(|writer| ActiveLog::start(writer, &config))
            .map_err(|e| {
                error!(error = %e, "error setting up event log");
                e
            })?;

        if self.formatter.is_none() {
            self.formatter = Some(config.format.formatter());
        }
        self.path = Some(path);
        self.state = State::Prepared(active);
        Ok(())
    }

    fn log(&self, event: &Event) -> Result<(), EventLogError> {
        let State::Prepared(active) = &self.state else {
            return Err(EventLogError::InvalidState {
                op: "log",
                phase: self.phase(),
            });
        };

        let line = match &self.formatter {
            Some(formatter) => formatter.format(event),
            None => event.to_string(),
        };

        // TODO: rotate events.log once it exceeds a configurable size bound
        active.writer.append_line(&line).map_err(|e| {
            error!(
                component = %event.component,
                stream = %event.stream,
                error = %e,
                "error logging event",
            );
            e
        })
    }

    fn close(&mut self) {
        let State::Prepared(active) = std::mem::replace(&mut self.state, State::Closed) else {
            return;
        };

        let path = active.writer.path().to_owned();
        let report = active.shutdown();
        match report.flush_task {
            FlushTaskExit::Stopped => {}
            FlushTaskExit::Failed(e) => {
                warn!(error = %e, "event log flush thread had stopped after a failed flush");
            }
            FlushTaskExit::Detached => {
                warn!("event log flush thread did not stop within the grace period, detaching it");
            }
        }
        match report.close {
            Ok(()) => info!(path = %path.display(), "closed event log"),
            Err(e) => warn!(path = %path.display(), error = %e, "error closing event log"),
        }
    }
}

impl Drop for FileEventLogger {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "file_logger_tests.rs"]
mod tests;
