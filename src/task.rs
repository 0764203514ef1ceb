// src/task.rs

//! Static task definitions and the per-task mutable record owned by a worker.

use std::time::Duration;

use crate::types::{Requirements, TaskStatus};

/// A task as defined in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: String,
    /// Simulated work per iteration, spent holding the resources.
    pub busy: Duration,
    /// Pause per iteration after the resources are released.
    pub idle: Duration,
    pub requirements: Requirements,
}

impl TaskSpec {
    pub fn new(
        name: impl Into<String>,
        busy: Duration,
        idle: Duration,
        requirements: Requirements,
    ) -> Self {
        Self {
            name: name.into(),
            busy,
            idle,
            requirements,
        }
    }
}

/// Printable form of a worker id; `-` for a record that never ran in a
/// spawned task.
pub fn worker_label(id: Option<tokio::task::Id>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Accumulated counters of one task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total_busy: Duration,
    pub total_idle: Duration,
    pub total_wait: Duration,
    pub executed: u64,
}

/// Mutable state of one task for the duration of a run.
///
/// A record is moved into exactly one worker and handed back when that
/// worker is joined, so only its own worker ever mutates it.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub index: usize,
    pub spec: TaskSpec,
    pub status: TaskStatus,
    pub stats: TaskStats,
    /// Id of the tokio task that ran this record, once it has started.
    pub worker: Option<tokio::task::Id>,
    assigned: bool,
}

impl TaskRecord {
    pub fn new(index: usize, spec: TaskSpec) -> Self {
        Self {
            index,
            spec,
            status: TaskStatus::default(),
            stats: TaskStats::default(),
            worker: None,
            assigned: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Mark the record as bound to a worker.
    ///
    /// Returns `false` if it was already assigned; the flag is never cleared.
    pub fn assign(&mut self) -> bool {
        if self.assigned {
            return false;
        }
        self.assigned = true;
        true
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned
    }
}
