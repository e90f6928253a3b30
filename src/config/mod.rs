//! Configuration module
//!
//! Handles loading and saving of weekly.toml tool settings.
//! A missing file means defaults; a malformed one is an error.

mod types;

pub use types::{AnalyzerSettings, Settings};

use crate::error::{Result, WeeklyError};
use std::fs;
use std::path::Path;

/// Default settings file name
pub const DEFAULT_PATH: &str = "weekly.toml";

/// Load settings from a TOML file, falling back to defaults when absent
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        WeeklyError::Config(format!(
            "Cannot read settings from '{}': {}",
            path.display(),
            e
        ))
    })?;

    let settings: Settings = toml::from_str(&content)?;

    if settings.analyzer.divisor == 0 {
        return Err(WeeklyError::Config(
            "analyzer.divisor must be greater than zero".to_string(),
        ));
    }

    Ok(settings)
}

/// Save settings to a TOML file
pub fn save(settings: &Settings, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(settings)
        .map_err(|e| WeeklyError::Config(format!("Failed to serialize settings: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, toml)?;
    Ok(())
}
