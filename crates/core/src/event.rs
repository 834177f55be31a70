// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic events recorded by an event logger.
//!
//! An [`Event`] describes one tuple notification (emit, ack, fail) observed
//! by a worker. Loggers never interpret the fields; they only need the event
//! rendered as a single line, which [`fmt::Display`] provides by default:
//!
//! ```text
//! 2023-11-14T22:13:20.000Z component=split task=3 stream=default message_id=- values=[1, 2]
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

crate::define_id! {
    /// Name of the component (spout or bolt) that produced a tuple.
    pub struct ComponentId;
}

crate::define_id! {
    /// Stream a tuple was emitted on.
    pub struct StreamId;
}

/// Stream used when a component emits without naming one.
pub const DEFAULT_STREAM: &str = "default";

/// One occurrence to be logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Wall-clock time of the occurrence, epoch milliseconds
    pub timestamp_ms: i64,
    pub component: ComponentId,
    /// Task index within the component
    pub task: u32,
    pub stream: StreamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub values: Vec<Value>,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn new(
        component: impl Into<ComponentId>,
        stream: impl Into<StreamId>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            component: component.into(),
            task: 0,
            stream: stream.into(),
            message_id: None,
            values,
        }
    }

    pub fn with_task(mut self, task: u32) -> Self {
        self.task = task;
        self
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Override the timestamp (epoch milliseconds).
    pub fn at(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// The timestamp as a UTC datetime, if it is in chrono's range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp() {
            Some(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))?,
            None => write!(f, "{}", self.timestamp_ms)?,
        }
        write!(
            f,
            " component={} task={} stream={} message_id={} values=[",
            self.component,
            self.task,
            self.stream,
            self.message_id.as_deref().unwrap_or("-"),
        )?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
