// src/config/mod.rs

//! Configuration for a simulation run.
//!
//! Responsibilities:
//! - Define the optional TOML settings model (`model.rs`).
//! - Load a settings file from disk (`loader.rs`).
//! - Validate value ranges (`validate.rs`).
//! - Merge CLI arguments and settings into one [`SimConfig`].

pub mod loader;
pub mod model;
pub mod validate;

use std::path::PathBuf;
use std::time::Duration;

pub use loader::{load_and_validate, load_from_path};
pub use model::{DEFAULT_BACKOFF_MS, SettingsFile, SimulationSection};
pub use validate::validate_settings;

use crate::cli::CliArgs;
use crate::errors::Result;

/// Fully resolved configuration of one run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub input_file: PathBuf,
    pub options: SimOptions,
}

/// Knobs of the simulation engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOptions {
    /// Delay between monitor snapshots; zero means no artificial delay.
    pub monitor_interval: Duration,
    /// Iterations every task performs before its worker exits.
    pub iterations: u64,
    /// Delay between resource polls of a waiting task.
    pub backoff: Duration,
    /// Wake waiting tasks as soon as resources are released.
    pub wake_on_release: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            monitor_interval: Duration::ZERO,
            iterations: 1,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            wake_on_release: true,
        }
    }
}

impl SimConfig {
    /// Build the run configuration from CLI arguments.
    ///
    /// Settings file values are applied first; CLI flags override them.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let settings = match args.settings {
            Some(ref path) => load_and_validate(path)?,
            None => SettingsFile::default(),
        };

        let backoff_ms = args.backoff_ms.unwrap_or(settings.simulation.backoff_ms);
        validate::validate_backoff(backoff_ms)?;

        Ok(Self {
            input_file: args.input_file.clone(),
            options: SimOptions {
                monitor_interval: Duration::from_millis(args.monitor_interval_ms),
                iterations: args.iterations,
                backoff: Duration::from_millis(backoff_ms),
                wake_on_release: settings.simulation.wake_on_release,
            },
        })
    }
}
