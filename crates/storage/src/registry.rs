// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Choosing an event logger backend from runtime configuration.

use crate::FileEventLogger;
use evlog_core::{ConfMap, EventLogError, EventLogger, NoopEventLogger};
use serde_json::Value;
use std::str::FromStr;

/// Runtime config key naming the backend.
pub const BACKEND_KEY: &str = "event.logger.backend";

/// Available event logger backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    File,
    Noop,
}

impl FromStr for Backend {
    type Err = EventLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "noop" => Ok(Backend::Noop),
            _ => Err(EventLogError::UnknownBackend(s.to_string())),
        }
    }
}

impl Backend {
    /// Backend named by `event.logger.backend`, defaulting to the file backend.
    pub fn from_conf(conf: &ConfMap) -> Result<Self, EventLogError> {
        match conf.get(BACKEND_KEY) {
            None => Ok(Backend::default()),
            Some(Value::String(name)) => name.parse(),
            Some(other) => Err(EventLogError::UnknownBackend(other.to_string())),
        }
    }
}

/// Build an unprepared event logger for the configured backend.
pub fn create_event_logger(conf: &ConfMap) -> Result<Box<dyn EventLogger>, EventLogError> {
    Ok(match Backend::from_conf(conf)? {
        Backend::File => Box::new(FileEventLogger::new()),
        Backend::Noop => Box::new(NoopEventLogger::new()),
    })
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
