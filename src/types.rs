use std::fmt;
use std::str::FromStr;

/// Live status of a task.
///
/// - `Wait`: polling the ledger for its resources.
/// - `Run`: holding its resources and sleeping its busy duration.
/// - `Idle`: resources released, sleeping its idle duration. Also the status
///   of a task that has not started yet or has finished all iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Wait,
    Run,
    Idle,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Idle
    }
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Wait => "WAIT",
            TaskStatus::Run => "RUN",
            TaskStatus::Idle => "IDLE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WAIT" => Ok(TaskStatus::Wait),
            "RUN" => Ok(TaskStatus::Run),
            "IDLE" => Ok(TaskStatus::Idle),
            other => Err(format!(
                "invalid task status: {other} (expected WAIT, RUN or IDLE)"
            )),
        }
    }
}

/// A single `(resource, amount)` requirement of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub resource: String,
    pub amount: u64,
}

impl Requirement {
    pub fn new(resource: impl Into<String>, amount: u64) -> Self {
        Self {
            resource: resource.into(),
            amount,
        }
    }
}

/// The full set of resources a task needs per iteration.
///
/// Entries naming the same resource are merged on insertion, so each
/// resource appears at most once. The ledger relies on this: a per-entry
/// availability check over duplicate names could otherwise overdraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    entries: Vec<Requirement>,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` of `resource`, merging with an existing entry.
    pub fn add(&mut self, resource: impl Into<String>, amount: u64) {
        let resource = resource.into();
        match self.entries.iter_mut().find(|r| r.resource == resource) {
            Some(existing) => existing.amount = existing.amount.saturating_add(amount),
            None => self.entries.push(Requirement { resource, amount }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Amount required of `resource`, or 0 when the task does not need it.
    pub fn amount_of(&self, resource: &str) -> u64 {
        self.entries
            .iter()
            .find(|r| r.resource == resource)
            .map(|r| r.amount)
            .unwrap_or(0)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Requirements {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut reqs = Requirements::new();
        for (name, amount) in iter {
            reqs.add(name, amount);
        }
        reqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requirements_are_merged() {
        let reqs: Requirements = [("cpu", 1), ("mem", 2), ("cpu", 3)].into_iter().collect();

        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs.amount_of("cpu"), 4);
        assert_eq!(reqs.amount_of("mem"), 2);
        assert_eq!(reqs.amount_of("disk"), 0);
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in [TaskStatus::Wait, TaskStatus::Run, TaskStatus::Idle] {
            let parsed: TaskStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("busy".parse::<TaskStatus>().is_err());
    }
}
