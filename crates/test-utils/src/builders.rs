#![allow(dead_code)]

use std::time::Duration;

use contend::input::Workload;
use contend::task::TaskSpec;
use contend::types::Requirements;

/// Builder for `Workload` to simplify test setup.
pub struct WorkloadBuilder {
    workload: Workload,
}

impl WorkloadBuilder {
    pub fn new() -> Self {
        Self {
            workload: Workload::default(),
        }
    }

    pub fn with_resource(mut self, name: &str, count: u64) -> Self {
        self.workload.resources.insert(name.to_string(), count);
        self
    }

    pub fn with_task(mut self, task: TaskSpec) -> Self {
        self.workload.tasks.push(task);
        self
    }

    pub fn build(self) -> Workload {
        self.workload
    }
}

impl Default for WorkloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskSpec`.
pub struct TaskSpecBuilder {
    name: String,
    busy: Duration,
    idle: Duration,
    requirements: Requirements,
}

impl TaskSpecBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            busy: Duration::ZERO,
            idle: Duration::ZERO,
            requirements: Requirements::new(),
        }
    }

    pub fn busy_ms(mut self, ms: u64) -> Self {
        self.busy = Duration::from_millis(ms);
        self
    }

    pub fn idle_ms(mut self, ms: u64) -> Self {
        self.idle = Duration::from_millis(ms);
        self
    }

    pub fn needs(mut self, resource: &str, amount: u64) -> Self {
        self.requirements.add(resource, amount);
        self
    }

    pub fn build(self) -> TaskSpec {
        TaskSpec::new(self.name, self.busy, self.idle, self.requirements)
    }
}
