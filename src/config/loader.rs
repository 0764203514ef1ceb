// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::SettingsFile;
use crate::config::validate::validate_settings;
use crate::errors::{ContendError, Result};

/// Load a settings file from a given path and return the raw `SettingsFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to also
/// check value ranges.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SettingsFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        ContendError::Settings(format!("reading settings file at {:?}: {e}", path))
    })?;

    let settings: SettingsFile = toml::from_str(&contents)?;
    debug!(?path, ?settings, "loaded settings file");

    Ok(settings)
}

/// Load a settings file from path and run basic validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<SettingsFile> {
    let settings = load_from_path(&path)?;
    validate_settings(&settings)?;
    Ok(settings)
}
