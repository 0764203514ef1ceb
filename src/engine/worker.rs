// src/engine/worker.rs

use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::{Stopwatch, as_millis};
use crate::engine::SimContext;
use crate::task::{TaskRecord, worker_label};
use crate::types::TaskStatus;

/// Executes one task's iterations.
///
/// The worker owns its [`TaskRecord`] for the whole run and hands it back
/// from [`Worker::run`], so the counters are only visible to anyone else
/// after the worker has been joined.
pub struct Worker {
    ctx: Arc<SimContext>,
    record: TaskRecord,
    run_clock: Stopwatch,
}

impl Worker {
    /// `run_clock` measures the simulation's total running time and is only
    /// used for progress logging.
    pub fn new(ctx: Arc<SimContext>, record: TaskRecord, run_clock: Stopwatch) -> Self {
        Self {
            ctx,
            record,
            run_clock,
        }
    }

    /// Run iterations until the configured count is reached.
    ///
    /// When spawned, the record is stamped with the id of the tokio task
    /// running it.
    pub async fn run(mut self) -> TaskRecord {
        let iterations = self.ctx.options.iterations;
        self.record.worker = tokio::task::try_id();
        let tid = worker_label(self.record.worker);
        debug!(
            task = %self.record.name(),
            index = self.record.index,
            %tid,
            iterations,
            "worker started"
        );

        while self.record.stats.executed < iterations {
            self.run_iteration().await;

            info!(
                task = %self.record.name(),
                %tid,
                iteration = self.record.stats.executed,
                time_ms = as_millis(self.run_clock.elapsed()),
                "iteration finished"
            );
        }

        debug!(task = %self.record.name(), "worker finished");
        self.record
    }

    async fn run_iteration(&mut self) {
        let ctx = Arc::clone(&self.ctx);
        let options = ctx.options;

        self.set_status(TaskStatus::Wait);
        let mut watch = Stopwatch::start();
        ctx.ledger
            .acquire(
                &self.record.spec.requirements,
                options.backoff,
                options.wake_on_release,
            )
            .await;
        self.record.stats.total_wait += watch.lap();

        self.set_status(TaskStatus::Run);
        tokio::time::sleep(self.record.spec.busy).await;
        self.record.stats.total_busy += watch.lap();
        ctx.ledger.release(&self.record.spec.requirements);

        self.set_status(TaskStatus::Idle);
        watch.lap();
        tokio::time::sleep(self.record.spec.idle).await;
        self.record.stats.total_idle += watch.lap();

        self.record.stats.executed += 1;
    }

    fn set_status(&mut self, status: TaskStatus) {
        self.ctx.board.transition(self.record.index, status);
        self.record.status = status;
        debug!(task = %self.record.name(), %status, "status changed");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SimOptions;
    use crate::engine::StatusBoard;
    use crate::ledger::ResourceLedger;
    use crate::task::TaskSpec;
    use crate::types::Requirements;

    fn context(resources: &[(&str, u64)], record: &TaskRecord, iterations: u64) -> Arc<SimContext> {
        Arc::new(SimContext::new(
            ResourceLedger::new(resources.iter().copied()),
            StatusBoard::new([(record.name().to_string(), record.status)]),
            SimOptions {
                iterations,
                ..SimOptions::default()
            },
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn worker_accumulates_busy_and_idle_time() {
        let spec = TaskSpec::new(
            "t",
            Duration::from_millis(100),
            Duration::from_millis(50),
            [("cpu", 1)].into_iter().collect(),
        );
        let record = TaskRecord::new(0, spec);
        let ctx = context(&[("cpu", 2)], &record, 3);

        let record = Worker::new(Arc::clone(&ctx), record, Stopwatch::start())
            .run()
            .await;

        assert_eq!(record.stats.executed, 3);
        assert!(record.stats.total_busy >= Duration::from_millis(300));
        assert!(record.stats.total_busy <= Duration::from_millis(310));
        assert!(record.stats.total_idle >= Duration::from_millis(150));
        assert!(record.stats.total_idle <= Duration::from_millis(160));
        assert!(record.stats.total_wait <= Duration::from_millis(5));
        assert_eq!(record.status, TaskStatus::Idle);
        assert_eq!(ctx.ledger.available("cpu"), 2);
        assert_eq!(ctx.board.status_of(0), Some(TaskStatus::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_iterations_leaves_record_untouched() {
        let spec = TaskSpec::new("t", Duration::from_millis(10), Duration::ZERO, Requirements::new());
        let record = TaskRecord::new(0, spec);
        let ctx = context(&[], &record, 0);

        let record = Worker::new(ctx, record, Stopwatch::start()).run().await;
        assert_eq!(record.stats.executed, 0);
        assert_eq!(record.stats.total_busy, Duration::ZERO);
        // Awaited inline, not spawned.
        assert_eq!(record.worker, None);
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_time_is_counted_while_resources_are_held_elsewhere() {
        let spec = TaskSpec::new(
            "t",
            Duration::from_millis(10),
            Duration::ZERO,
            [("cpu", 1)].into_iter().collect(),
        );
        let record = TaskRecord::new(0, spec);
        let ctx = context(&[("cpu", 1)], &record, 1);

        let held: Requirements = [("cpu", 1)].into_iter().collect();
        assert!(ctx.ledger.try_acquire(&held));

        let handle = tokio::spawn(Worker::new(Arc::clone(&ctx), record, Stopwatch::start()).run());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(ctx.board.status_of(0), Some(TaskStatus::Wait));
        ctx.ledger.release(&held);

        let worker_id = handle.id();
        let record = handle.await.unwrap();
        assert_eq!(record.worker, Some(worker_id));
        assert_eq!(record.stats.executed, 1);
        assert!(record.stats.total_wait >= Duration::from_millis(100));
        assert!(record.stats.total_wait <= Duration::from_millis(125));
    }
}
