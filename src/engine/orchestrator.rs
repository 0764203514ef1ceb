// src/engine/orchestrator.rs

use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::{Stopwatch, as_millis};
use crate::config::SimOptions;
use crate::engine::monitor::{Monitor, MonitorSink};
use crate::engine::status::StatusBoard;
use crate::engine::worker::Worker;
use crate::engine::SimContext;
use crate::errors::{ContendError, Result};
use crate::input::Workload;
use crate::ledger::ResourceLedger;
use crate::report::Report;
use crate::task::TaskRecord;

/// One complete simulation run.
///
/// Lifecycle of [`Simulation::run`]:
/// 1. build the shared [`SimContext`] (ledger, status board, options)
/// 2. start the monitor
/// 3. bind every record to a worker, then spawn one worker per task
/// 4. join every worker
/// 5. stop and join the monitor
/// 6. build the [`Report`] from the settled ledger and the returned records
#[derive(Debug)]
pub struct Simulation {
    workload: Workload,
    options: SimOptions,
}

impl Simulation {
    pub fn new(workload: Workload, options: SimOptions) -> Self {
        Self { workload, options }
    }

    pub async fn run<S>(self, sink: S) -> Result<Report>
    where
        S: MonitorSink + 'static,
    {
        let clock = Stopwatch::start();
        let Workload { resources, tasks } = self.workload;

        let records: Vec<TaskRecord> = tasks
            .into_iter()
            .enumerate()
            .map(|(index, spec)| TaskRecord::new(index, spec))
            .collect();

        let board = StatusBoard::new(records.iter().map(|r| (r.name().to_string(), r.status)));
        let ctx = Arc::new(SimContext::new(
            ResourceLedger::new(resources),
            board,
            self.options,
        ));

        let (stop_tx, stop_rx) = watch::channel(false);
        info!(
            interval_ms = as_millis(self.options.monitor_interval),
            "starting monitor"
        );
        let monitor = tokio::spawn(Monitor::new(Arc::clone(&ctx), sink).run(stop_rx));

        info!(
            tasks = records.len(),
            iterations = self.options.iterations,
            "starting task workers"
        );
        let workers = spawn_workers(&ctx, records, clock)?;

        info!("waiting for tasks to finish");
        let joined = join_workers(workers).await;

        let elapsed = clock.elapsed();
        // The receiver may already be gone if the monitor panicked.
        let _ = stop_tx.send(true);
        match monitor.await {
            Ok(emitted) => debug!(emitted, "monitor joined"),
            Err(err) => warn!(error = %err, "monitor ended abnormally"),
        }

        let records = joined?;
        info!(elapsed_ms = as_millis(elapsed), "all tasks finished");

        Ok(Report::new(ctx.ledger.snapshot(), &records, elapsed))
    }
}

type WorkerHandle = (String, JoinHandle<TaskRecord>);

/// Bind every record to a worker, then spawn them.
///
/// All bindings are settled in a first pass, so no worker is running while
/// another record is still unbound.
fn spawn_workers(
    ctx: &Arc<SimContext>,
    mut records: Vec<TaskRecord>,
    clock: Stopwatch,
) -> Result<Vec<WorkerHandle>> {
    for record in &mut records {
        if !record.assign() {
            return Err(ContendError::Other(anyhow!(
                "task '{}' is already bound to a worker",
                record.name()
            )));
        }
    }

    let handles = records
        .into_iter()
        .map(|record| {
            let name = record.name().to_string();
            let handle = tokio::spawn(Worker::new(Arc::clone(ctx), record, clock).run());
            debug!(task = %name, tid = %handle.id(), "spawned worker");
            (name, handle)
        })
        .collect();

    Ok(handles)
}

/// Join workers in task order, returning their records.
///
/// On the first failed worker the remaining ones are aborted.
async fn join_workers(handles: Vec<WorkerHandle>) -> Result<Vec<TaskRecord>> {
    let mut records = Vec::with_capacity(handles.len());
    let mut handles = handles.into_iter();

    while let Some((name, handle)) = handles.next() {
        let tid = handle.id();
        match handle.await {
            Ok(record) => {
                debug!(task = %name, %tid, "worker joined");
                records.push(record);
            }
            Err(err) => {
                for (_, rest) in handles {
                    rest.abort();
                }
                return Err(ContendError::WorkerFailed {
                    task: name,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(records)
}
