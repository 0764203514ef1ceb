// src/engine/status.rs

//! The global status lock.
//!
//! Every status transition and every monitor snapshot goes through the one
//! mutex in [`StatusBoard`], so a snapshot never observes a task between two
//! states.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::TaskStatus;

#[derive(Debug)]
pub struct StatusBoard {
    entries: Mutex<Vec<(String, TaskStatus)>>,
}

impl StatusBoard {
    /// One entry per task, in task index order.
    pub fn new<S: Into<String>>(tasks: impl IntoIterator<Item = (S, TaskStatus)>) -> Self {
        Self {
            entries: Mutex::new(
                tasks
                    .into_iter()
                    .map(|(name, status)| (name.into(), status))
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, TaskStatus)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the status of task `index`.
    pub fn transition(&self, index: usize, status: TaskStatus) {
        if let Some(entry) = self.lock().get_mut(index) {
            entry.1 = status;
        }
    }

    pub fn status_of(&self, index: usize) -> Option<TaskStatus> {
        self.lock().get(index).map(|(_, status)| *status)
    }

    /// Group every task by status under a single acquisition of the lock.
    pub fn snapshot(&self) -> StatusSnapshot {
        let entries = self.lock();
        let mut snapshot = StatusSnapshot::default();
        for (name, status) in entries.iter() {
            let group = match status {
                TaskStatus::Wait => &mut snapshot.waiting,
                TaskStatus::Run => &mut snapshot.running,
                TaskStatus::Idle => &mut snapshot.idle,
            };
            group.push(name.clone());
        }
        snapshot
    }
}

/// Task names grouped by status, each group in task index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub waiting: Vec<String>,
    pub running: Vec<String>,
    pub idle: Vec<String>,
}

impl StatusSnapshot {
    pub fn total(&self) -> usize {
        self.waiting.len() + self.running.len() + self.idle.len()
    }

    pub fn group(&self, status: TaskStatus) -> &[String] {
        match status {
            TaskStatus::Wait => &self.waiting,
            TaskStatus::Run => &self.running,
            TaskStatus::Idle => &self.idle,
        }
    }
}
