// src/engine/mod.rs

//! Concurrency engine.
//!
//! - [`status`]: the global status lock shared by workers and the monitor.
//! - [`worker`]: one per task, runs the WAIT → RUN → IDLE cycle.
//! - [`monitor`]: periodically snapshots every task's status into a
//!   [`MonitorSink`].
//! - [`orchestrator`]: seeds the shared state, starts the monitor and the
//!   workers, joins them and builds the final [`Report`](crate::report::Report).
//!
//! Workers and the monitor share one [`SimContext`]; nothing in the engine
//! is process-global.

pub mod monitor;
pub mod orchestrator;
pub mod status;
pub mod worker;

pub use monitor::{Monitor, MonitorSink, StdoutSink};
pub use orchestrator::Simulation;
pub use status::{StatusBoard, StatusSnapshot};
pub use worker::Worker;

use crate::config::SimOptions;
use crate::ledger::ResourceLedger;

/// State shared by every worker and the monitor of one run.
#[derive(Debug)]
pub struct SimContext {
    pub ledger: ResourceLedger,
    pub board: StatusBoard,
    pub options: SimOptions,
}

impl SimContext {
    pub fn new(ledger: ResourceLedger, board: StatusBoard, options: SimOptions) -> Self {
        Self {
            ledger,
            board,
            options,
        }
    }
}
