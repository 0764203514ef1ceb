// src/config/model.rs

use serde::Deserialize;

/// Default delay between resource polls of a waiting task.
pub const DEFAULT_BACKOFF_MS: u64 = 20;

/// Optional settings file as read from TOML.
///
/// ```toml
/// [simulation]
/// backoff_ms = 20
/// wake_on_release = true
/// ```
///
/// All sections and keys are optional and have defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Delay between resource polls while a task waits, in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Also wake waiting tasks as soon as any task releases resources.
    ///
    /// When `false`, waiting tasks only notice releases on their next poll.
    #[serde(default = "default_wake_on_release")]
    pub wake_on_release: bool,
}

fn default_backoff_ms() -> u64 {
    DEFAULT_BACKOFF_MS
}

fn default_wake_on_release() -> bool {
    true
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            backoff_ms: default_backoff_ms(),
            wake_on_release: default_wake_on_release(),
        }
    }
}
