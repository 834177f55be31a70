// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! evlog-core: event types and the event logger contract shared by all
//! event log backends.

pub mod error;
pub mod event;
pub mod format;
pub mod id;
pub mod identity;
pub mod logger;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::{EventLogError, LoggerPhase};
pub use event::{ComponentId, Event, StreamId, DEFAULT_STREAM};
pub use format::{EventFormatter, JsonFormatter, LineFormat, TextFormatter};
pub use identity::{TopologyId, WorkerIdentity};
pub use logger::{ConfMap, EventLogger, NoopEventLogger};
