// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event logger contract.

use crate::{Event, EventLogError, LoggerPhase, WorkerIdentity};
use serde_json::Value;
use std::collections::HashMap;

/// Process-wide configuration and logger-specific arguments.
pub type ConfMap = HashMap<String, Value>;

/// Capability set every event logging backend implements.
///
/// The host calls [`prepare`](EventLogger::prepare) once, then
/// [`log`](EventLogger::log) from any number of worker threads, then
/// [`close`](EventLogger::close) once.
pub trait EventLogger: Send + Sync {
    /// Establish everything needed to log. Valid only on a fresh logger.
    fn prepare(
        &mut self,
        conf: &ConfMap,
        arguments: &ConfMap,
        identity: &WorkerIdentity,
    ) -> Result<(), EventLogError>;

    /// Queue one formatted line for `event`. Returns once the line is
    /// buffered, not once it is durable.
    fn log(&self, event: &Event) -> Result<(), EventLogError>;

    /// Stop background work and release resources. Never fails; problems are
    /// reported through diagnostics. Calling it again is a no-op.
    fn close(&mut self);
}

/// Event logger that discards every event.
#[derive(Debug, Default)]
pub struct NoopEventLogger {
    phase: LoggerPhase,
}

impl NoopEventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoggerPhase {
        self.phase
    }
}

impl EventLogger for NoopEventLogger {
    fn prepare(
        &mut self,
        _conf: &ConfMap,
        _arguments: &ConfMap,
        _identity: &WorkerIdentity,
    ) -> Result<(), EventLogError> {
        self.phase.require(LoggerPhase::Created, "prepare")?;
        self.phase = LoggerPhase::Prepared;
        Ok(())
    }

    fn log(&self, _event: &Event) -> Result<(), EventLogError> {
        self.phase.require(LoggerPhase::Prepared, "log")
    }

    fn close(&mut self) {
        self.phase = LoggerPhase::Closed;
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
