use std::sync::{Arc, Mutex};

use contend::engine::{MonitorSink, StatusSnapshot};

/// Shared view of what a [`RecordingSink`] has seen.
#[derive(Debug, Default)]
pub struct Recorded {
    /// Total number of snapshots emitted.
    pub count: u64,
    /// The first `limit` snapshots, in emission order.
    pub snapshots: Vec<StatusSnapshot>,
}

/// A monitor sink that:
/// - counts every snapshot it receives
/// - keeps the first `limit` of them for inspection.
///
/// The limit keeps memory bounded when the monitor runs with a zero
/// interval and emits as fast as it can.
pub struct RecordingSink {
    limit: usize,
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingSink {
    pub fn new(limit: usize) -> (Self, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        (
            Self {
                limit,
                recorded: Arc::clone(&recorded),
            },
            recorded,
        )
    }
}

impl MonitorSink for RecordingSink {
    fn emit(&mut self, snapshot: &StatusSnapshot) {
        let mut guard = self.recorded.lock().unwrap();
        guard.count += 1;
        if guard.snapshots.len() < self.limit {
            guard.snapshots.push(snapshot.clone());
        }
    }
}
