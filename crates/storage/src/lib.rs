// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! File-backed event log for worker diagnostics

mod config;
mod file_logger;
mod registry;
mod scheduler;
mod writer;

#[cfg(test)]
mod fake_sink;

pub use config::{
    FileLoggerConfig, BUFFER_BYTES_KEY, DEFAULT_BUFFER_BYTES, DEFAULT_FLUSH_INTERVAL,
    DEFAULT_SHUTDOWN_GRACE, FLUSH_INTERVAL_KEY, FORMAT_KEY, SHUTDOWN_GRACE_KEY,
};
pub use file_logger::{event_log_path, FileEventLogger, EVENT_LOG_FILE_NAME};
pub use registry::{create_event_logger, Backend, BACKEND_KEY};
pub use scheduler::{FlushScheduler, FlushTaskExit};
pub use writer::{LogSink, LogWriter};
