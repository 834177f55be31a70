// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Arguments accepted by the file-backed event logger.

use evlog_core::{ConfMap, EventLogError, LineFormat};
use serde_json::Value;
use std::time::Duration;

pub const FLUSH_INTERVAL_KEY: &str = "flush.interval.ms";
pub const SHUTDOWN_GRACE_KEY: &str = "shutdown.grace.ms";
pub const BUFFER_BYTES_KEY: &str = "buffer.bytes";
pub const FORMAT_KEY: &str = "format";

pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);
pub const DEFAULT_BUFFER_BYTES: usize = 8 * 1024;

/// One day; longer intervals are almost certainly unit mistakes.
const MAX_MILLIS: u64 = 24 * 60 * 60 * 1000;
const MAX_BUFFER_BYTES: u64 = 64 * 1024 * 1024;

/// Settings for one [`FileEventLogger`](crate::FileEventLogger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLoggerConfig {
    /// Period of the background flush
    pub flush_interval: Duration,
    /// How long `close` waits for the flush thread
    pub shutdown_grace: Duration,
    /// Capacity of the in-memory line buffer
    pub buffer_bytes: usize,
    /// Line format used unless a custom formatter is installed
    pub format: LineFormat,
}

impl Default for FileLoggerConfig {
    fn default() -> Self {
        Self {
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            buffer_bytes: DEFAULT_BUFFER_BYTES,
            format: LineFormat::default(),
        }
    }
}

impl FileLoggerConfig {
    /// Read settings from logger arguments. Missing keys keep their defaults;
    /// unknown keys are ignored.
    pub fn from_arguments(arguments: &ConfMap) -> Result<Self, EventLogError> {
        let defaults = Self::default();

        let flush_interval = positive_arg(arguments, FLUSH_INTERVAL_KEY, MAX_MILLIS)?
            .map_or(defaults.flush_interval, Duration::from_millis);
        let shutdown_grace = positive_arg(arguments, SHUTDOWN_GRACE_KEY, MAX_MILLIS)?
            .map_or(defaults.shutdown_grace, Duration::from_millis);
        let buffer_bytes = positive_arg(arguments, BUFFER_BYTES_KEY, MAX_BUFFER_BYTES)?
            .map_or(defaults.buffer_bytes, |n| n as usize);

        let format = match arguments.get(FORMAT_KEY) {
            None => defaults.format,
            Some(Value::String(s)) => s
                .parse()
                .map_err(|message| invalid(FORMAT_KEY, message))?,
            Some(other) => {
                return Err(invalid(FORMAT_KEY, format!("expected a string, got {other}")))
            }
        };

        Ok(Self {
            flush_interval,
            shutdown_grace,
            buffer_bytes,
            format,
        })
    }
}

/// Integer argument in `1..=max`, given as a JSON number or numeric string.
fn positive_arg(arguments: &ConfMap, key: &str, max: u64) -> Result<Option<u64>, EventLogError> {
    let Some(value) = arguments.get(key) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if (1..=max).contains(&n) => Ok(Some(n)),
        Some(n) => Err(invalid(key, format!("{n} is outside 1..={max}"))),
        None => Err(invalid(key, format!("expected a positive integer, got {value}"))),
    }
}

fn invalid(key: &str, message: String) -> EventLogError {
    EventLogError::InvalidArgument {
        key: key.to_string(),
        message,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
