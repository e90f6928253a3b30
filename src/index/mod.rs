//! Issue index persistence module
//!
//! Loads and saves the JSON document listing every newsletter issue.
//! An unreadable file or invalid JSON yields an empty index. Valid JSON
//! that cannot be mapped onto the index layout is an error, so the file
//! is never overwritten with less than it held.

mod lenient;
mod types;

pub use lenient::IssueDate;
pub use types::{ContentStats, IssueIndex, IssueRecord};

use serde_json::Value;

use crate::error::{Result, WeeklyError};
use std::fs;
use std::path::Path;

/// Load the issue index, or an empty one if it cannot be read or parsed
pub fn load(path: &Path) -> Result<IssueIndex> {
    let value = match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read index '{}': {}", path.display(), e);
            return Ok(IssueIndex::default());
        }
    };

    serde_json::from_value(value).map_err(|e| {
        WeeklyError::Index(format!(
            "'{}' does not have the expected layout ({}); refusing to overwrite it",
            path.display(),
            e
        ))
    })
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Save the issue index as 2-space indented JSON
///
/// Writes to a sibling temp file first and renames it over the target.
pub fn save(index: &IssueIndex, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(index)?;

    let mut tmp_name = path
        .file_name()
        .ok_or_else(|| WeeklyError::Index(format!("Invalid index path: {}", path.display())))?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
