// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event logger errors.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle phase of an event logger: `Created -> Prepared -> Closed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggerPhase {
    #[default]
    Created,
    Prepared,
    Closed,
}

impl fmt::Display for LoggerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerPhase::Created => "created",
            LoggerPhase::Prepared => "prepared",
            LoggerPhase::Closed => "closed",
        })
    }
}

impl LoggerPhase {
    /// Fail with [`EventLogError::InvalidState`] unless in the `expected` phase.
    pub fn require(self, expected: LoggerPhase, op: &'static str) -> Result<(), EventLogError> {
        if self == expected {
            Ok(())
        } else {
            Err(EventLogError::InvalidState { op, phase: self })
        }
    }
}

/// Errors that can occur while setting up, writing, flushing or closing an
/// event log.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("failed to set up event log {}: {source}", path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to append to event log {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("scheduled flush of {} failed: {source}", path.display())]
    ScheduledFlush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to close event log {}: {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid event logger argument {key}: {message}")]
    InvalidArgument { key: String, message: String },
    #[error("unknown event logger backend: {0}")]
    UnknownBackend(String),
    #[error("cannot {op} an event logger that is {phase}")]
    InvalidState { op: &'static str, phase: LoggerPhase },
}

impl EventLogError {
    /// Whether the caller of the failing operation has to act on this error.
    ///
    /// Scheduled-flush and close failures only ever reach diagnostics; every
    /// other variant is returned synchronously to the caller.
    pub fn is_fatal_to_caller(&self) -> bool {
        !matches!(
            self,
            EventLogError::ScheduledFlush { .. } | EventLogError::Close { .. }
        )
    }
}
