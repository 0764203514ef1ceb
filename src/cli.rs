// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `contend`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "contend",
    version,
    about = "Simulate tasks contending for a shared pool of countable resources.",
    long_about = None
)]
pub struct CliArgs {
    /// Input file with `resources` and `task` lines.
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Delay between monitor snapshots in milliseconds (0 = no delay).
    #[arg(value_name = "MONITOR_INTERVAL_MS")]
    pub monitor_interval_ms: u64,

    /// Number of WAIT/RUN/IDLE iterations every task performs.
    #[arg(value_name = "ITERATIONS")]
    pub iterations: u64,

    /// Optional TOML settings file (`[simulation]` section).
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Delay between resource polls of a waiting task, in milliseconds.
    ///
    /// Overrides `simulation.backoff_ms` from the settings file.
    #[arg(long, value_name = "MS")]
    pub backoff_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CONTEND_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the input, print the workload, but run nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
