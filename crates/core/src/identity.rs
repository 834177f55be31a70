// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity of the worker an event logger runs in.

use std::fmt;
use std::path::{Path, PathBuf};

crate::define_id! {
    /// Identifier of a running topology.
    pub struct TopologyId;
}

/// Who is logging, and where its on-disk artifacts live.
///
/// The artifact root is resolved by the host (conventionally scoped by
/// topology id and worker port so co-located workers do not collide).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerIdentity {
    pub topology_id: TopologyId,
    pub worker_port: u16,
    pub artifact_root: PathBuf,
}

impl WorkerIdentity {
    pub fn new(
        topology_id: impl Into<TopologyId>,
        worker_port: u16,
        artifact_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            topology_id: topology_id.into(),
            worker_port,
            artifact_root: artifact_root.into(),
        }
    }

    pub fn artifact_root(&self) -> &Path {
        &self.artifact_root
    }
}

impl fmt::Display for WorkerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.topology_id, self.worker_port)
    }
}
