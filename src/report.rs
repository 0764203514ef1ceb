// src/report.rs

//! Final report of a finished run.
//!
//! [`Report`] is plain data built from the settled ledger and task records;
//! its `Display` impl is the text printed at the end of a run.

use std::fmt;
use std::time::Duration;

use crate::clock::as_millis;
use crate::ledger::ResourceLevel;
use crate::task::{TaskRecord, worker_label};
use crate::types::TaskStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub resources: Vec<ResourceLevel>,
    pub tasks: Vec<TaskReport>,
    /// Wall-clock time from the start of the run until all workers joined.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub index: usize,
    pub name: String,
    pub status: TaskStatus,
    pub busy: Duration,
    pub idle: Duration,
    pub total_busy: Duration,
    pub total_idle: Duration,
    pub total_wait: Duration,
    pub executed: u64,
    /// Tokio task that ran this task's iterations.
    pub worker: Option<tokio::task::Id>,
    /// `(resource, amount needed)` in the order the input listed them.
    pub requirements: Vec<(String, u64)>,
}

impl From<&TaskRecord> for TaskReport {
    fn from(record: &TaskRecord) -> Self {
        Self {
            index: record.index,
            name: record.spec.name.clone(),
            status: record.status,
            busy: record.spec.busy,
            idle: record.spec.idle,
            total_busy: record.stats.total_busy,
            total_idle: record.stats.total_idle,
            total_wait: record.stats.total_wait,
            executed: record.stats.executed,
            worker: record.worker,
            requirements: record
                .spec
                .requirements
                .iter()
                .map(|r| (r.resource.clone(), r.amount))
                .collect(),
        }
    }
}

impl Report {
    pub fn new(resources: Vec<ResourceLevel>, records: &[TaskRecord], elapsed: Duration) -> Self {
        let mut tasks: Vec<TaskReport> = records.iter().map(TaskReport::from).collect();
        tasks.sort_by_key(|t| t.index);
        Self {
            resources,
            tasks,
            elapsed,
        }
    }

    pub fn task(&self, name: &str) -> Option<&TaskReport> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceLevel> {
        self.resources.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System Resources:")?;
        for r in &self.resources {
            let held = r.seed.saturating_sub(r.available);
            writeln!(
                f,
                "\t{}: (maxAvail= {:>4}, held= {:>4})",
                r.name, r.available, held
            )?;
        }
        writeln!(f)?;

        writeln!(f, "System Tasks:")?;
        for t in &self.tasks {
            writeln!(
                f,
                "[{}] {} ({}, runTime= {} msec, idleTime= {} msec):",
                t.index,
                t.name,
                t.status,
                as_millis(t.busy),
                as_millis(t.idle),
            )?;
            writeln!(f, "\t (tid= {})", worker_label(t.worker))?;
            for (resource, needed) in &t.requirements {
                writeln!(f, "\t {resource}: (needed= {needed:>4}, held= 0)")?;
            }
            writeln!(
                f,
                "\t (RUN: {} times, WAIT: {} msec, busy total: {} msec, idle total: {} msec)",
                t.executed,
                as_millis(t.total_wait),
                as_millis(t.total_busy),
                as_millis(t.total_idle),
            )?;
            writeln!(f)?;
        }

        writeln!(f, "Running time= {} msec", as_millis(self.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskSpec, TaskStats};

    fn sample() -> Report {
        let spec = TaskSpec::new(
            "build",
            Duration::from_millis(100),
            Duration::from_millis(50),
            [("cpu", 1), ("disk", 2)].into_iter().collect(),
        );
        let mut record = TaskRecord::new(0, spec);
        record.stats = TaskStats {
            total_busy: Duration::from_millis(300),
            total_idle: Duration::from_millis(150),
            total_wait: Duration::from_millis(12),
            executed: 3,
        };

        Report::new(
            vec![ResourceLevel {
                name: "cpu".into(),
                available: 2,
                seed: 2,
            }],
            &[record],
            Duration::from_millis(470),
        )
    }

    #[test]
    fn report_carries_task_and_resource_data() {
        let report = sample();
        let build = report.task("build").unwrap();

        assert_eq!(build.executed, 3);
        assert_eq!(build.total_busy, Duration::from_millis(300));
        assert_eq!(
            build.requirements,
            vec![("cpu".to_string(), 1), ("disk".to_string(), 2)]
        );
        assert_eq!(report.resource("cpu").unwrap().available, 2);
        assert!(report.task("missing").is_none());
    }

    #[test]
    fn display_renders_every_section() {
        let text = sample().to_string();

        assert!(text.starts_with("System Resources:\n"));
        assert!(text.contains("\tcpu: (maxAvail=    2, held=    0)"));
        assert!(text.contains("[0] build (IDLE, runTime= 100 msec, idleTime= 50 msec):\n\t (tid= -)\n"));
        assert!(text.contains("\t disk: (needed=    2, held= 0)"));
        assert!(text.contains("(RUN: 3 times, WAIT: 12 msec, busy total: 300 msec, idle total: 150 msec)"));
        assert!(text.ends_with("Running time= 470 msec\n"));
    }
}
