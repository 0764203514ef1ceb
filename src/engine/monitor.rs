// src/engine/monitor.rs

//! Periodic status reporting.
//!
//! The monitor runs for the lifetime of a simulation. Each cycle it waits
//! for the configured interval, takes a [`StatusSnapshot`] under the status
//! lock and hands it to a [`MonitorSink`]. It stops as soon as its stop
//! signal flips, even in the middle of an interval.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::clock::as_millis;
use crate::engine::SimContext;
use crate::engine::status::StatusSnapshot;
use crate::types::TaskStatus;

/// Destination for monitor snapshots.
///
/// Production code uses [`StdoutSink`]; tests can record snapshots instead.
pub trait MonitorSink: Send {
    fn emit(&mut self, snapshot: &StatusSnapshot);
}

/// Prints every snapshot to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl MonitorSink for StdoutSink {
    fn emit(&mut self, snapshot: &StatusSnapshot) {
        let mut out = std::io::stdout().lock();
        if let Err(err) = writeln!(out, "{}", render(snapshot)) {
            warn!(error = %err, "failed to write monitor output");
        }
    }
}

/// Text block for one snapshot.
pub fn render(snapshot: &StatusSnapshot) -> String {
    format!(
        "monitor: [WAIT] {}\n         [RUN] {}\n         [IDLE] {}\n",
        snapshot.group(TaskStatus::Wait).join(" "),
        snapshot.group(TaskStatus::Run).join(" "),
        snapshot.group(TaskStatus::Idle).join(" "),
    )
}

pub struct Monitor<S: MonitorSink> {
    ctx: Arc<SimContext>,
    interval: Duration,
    sink: S,
}

impl<S: MonitorSink> Monitor<S> {
    pub fn new(ctx: Arc<SimContext>, sink: S) -> Self {
        let interval = ctx.options.monitor_interval;
        Self {
            ctx,
            interval,
            sink,
        }
    }

    /// Emit snapshots until `stop` becomes `true` or its sender is dropped.
    ///
    /// Returns the number of snapshots emitted.
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) -> u64 {
        debug!(interval_ms = as_millis(self.interval), "monitor started");
        let mut emitted = 0u64;

        loop {
            if stop_requested(&stop) {
                break;
            }

            if self.interval.is_zero() {
                // No artificial delay; still give workers a chance to run.
                tokio::task::yield_now().await;
            } else {
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = stop.changed() => break,
                }
            }

            if stop_requested(&stop) {
                break;
            }

            let snapshot = self.ctx.board.snapshot();
            self.sink.emit(&snapshot);
            emitted += 1;
        }

        debug!(emitted, "monitor stopped");
        emitted
    }
}

/// A dropped sender counts as a stop request.
fn stop_requested(stop: &watch::Receiver<bool>) -> bool {
    *stop.borrow() || stop.has_changed().is_err()
}
