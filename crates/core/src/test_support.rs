// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ConfMap, Event, WorkerIdentity};
use serde_json::Value;
use std::path::Path;

/// Fixed timestamp so rendered lines are deterministic.
pub const TEST_TIMESTAMP_MS: i64 = 1_700_000_000_000;

pub const TEST_TOPOLOGY: &str = "topo1";
pub const TEST_PORT: u16 = 6700;

pub fn tuple_event(component: &str, stream: &str, values: &[i64]) -> Event {
    Event::new(component, stream, values.iter().map(|v| Value::from(*v)).collect())
        .at(TEST_TIMESTAMP_MS)
        .with_task(1)
}

/// An event whose line identifies it by `seq`.
pub fn numbered_event(seq: usize) -> Event {
    tuple_event("spout", "default", &[seq as i64])
}

pub fn worker_identity(artifact_root: &Path) -> WorkerIdentity {
    WorkerIdentity::new(TEST_TOPOLOGY, TEST_PORT, artifact_root)
}

pub fn conf(pairs: &[(&str, Value)]) -> ConfMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
