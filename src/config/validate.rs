// src/config/validate.rs

use crate::config::model::SettingsFile;
use crate::errors::{ContendError, Result};

/// Run basic semantic validation against loaded settings.
///
/// This checks:
/// - `simulation.backoff_ms >= 1`
pub fn validate_settings(settings: &SettingsFile) -> Result<()> {
    validate_backoff(settings.simulation.backoff_ms)
}

/// A zero backoff would turn every waiting task into a hot spin on the
/// ledger lock.
pub fn validate_backoff(backoff_ms: u64) -> Result<()> {
    if backoff_ms == 0 {
        return Err(ContendError::Settings(
            "simulation.backoff_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
