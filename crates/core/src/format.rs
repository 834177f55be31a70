// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering events as log lines.

use crate::Event;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Turns an event into the text of one log line (without terminator).
pub trait EventFormatter: Send + Sync {
    fn format(&self, event: &Event) -> String;
}

impl<F> EventFormatter for F
where
    F: Fn(&Event) -> String + Send + Sync,
{
    fn format(&self, event: &Event) -> String {
        self(event)
    }
}

/// The event's canonical `Display` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl EventFormatter for TextFormatter {
    fn format(&self, event: &Event) -> String {
        event.to_string()
    }
}

/// One compact JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl EventFormatter for JsonFormatter {
    fn format(&self, event: &Event) -> String {
        // Only non-string map keys can fail, and Event has none.
        serde_json::to_string(event).unwrap_or_else(|_| event.to_string())
    }
}

/// Built-in line formats, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineFormat {
    #[default]
    Text,
    Json,
}

impl LineFormat {
    pub fn formatter(self) -> Arc<dyn EventFormatter> {
        match self {
            LineFormat::Text => Arc::new(TextFormatter),
            LineFormat::Json => Arc::new(JsonFormatter),
        }
    }
}

impl FromStr for LineFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LineFormat::Text),
            "json" => Ok(LineFormat::Json),
            other => Err(format!("unknown line format '{other}' (expected text or json)")),
        }
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineFormat::Text => "text",
            LineFormat::Json => "json",
        })
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
