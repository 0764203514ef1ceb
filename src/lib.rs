// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod errors;
pub mod input;
pub mod ledger;
pub mod logging;
pub mod report;
pub mod task;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{SimConfig, SimOptions};
use crate::engine::{MonitorSink, Simulation, StdoutSink};
use crate::errors::Result;
use crate::input::Workload;
use crate::report::Report;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - configuration (CLI + optional settings file)
/// - input parsing
/// - the simulation engine with a stdout monitor
/// - printing the final report
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = SimConfig::from_args(&args)?;

    info!(path = ?cfg.input_file, "reading input file");
    let workload = input::parse_file(&cfg.input_file)?;

    if args.dry_run {
        print_dry_run(&workload, &cfg.options);
        return Ok(());
    }

    let report = simulate(workload, cfg.options, StdoutSink).await?;
    print!("{report}");
    Ok(())
}

/// Run a parsed workload to completion and return its report.
pub async fn simulate<S>(workload: Workload, options: SimOptions, sink: S) -> Result<Report>
where
    S: MonitorSink + 'static,
{
    Simulation::new(workload, options).run(sink).await
}

/// Simple dry-run output: print resources, tasks and effective options.
fn print_dry_run(workload: &Workload, options: &SimOptions) {
    println!("contend dry-run");
    println!("  iterations = {}", options.iterations);
    println!("  monitor_interval_ms = {}", options.monitor_interval.as_millis());
    println!("  backoff_ms = {}", options.backoff.as_millis());
    println!("  wake_on_release = {}", options.wake_on_release);
    println!();

    println!("resources ({}):", workload.resources.len());
    for (name, count) in &workload.resources {
        println!("  - {name}: {count}");
    }
    println!();

    println!("tasks ({}):", workload.tasks.len());
    for (index, task) in workload.tasks.iter().enumerate() {
        println!("  [{index}] {}", task.name);
        println!("      busy: {} ms", task.busy.as_millis());
        println!("      idle: {} ms", task.idle.as_millis());
        if !task.requirements.is_empty() {
            let needs: Vec<String> = task
                .requirements
                .iter()
                .map(|r| format!("{}:{}", r.resource, r.amount))
                .collect();
            println!("      needs: {}", needs.join(" "));
        }
    }

    debug!("dry-run complete (no execution)");
}
