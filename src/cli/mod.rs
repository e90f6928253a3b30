//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - add: Add or update an issue record
//! - scan: Reconcile the index with the weeklies directory
//! - publish: Mark an issue as published
//! - config init: Initialize the settings file

pub mod add;
pub mod config;
pub mod publish;
pub mod scan;

use std::path::Path;

use crate::error::{Result, WeeklyError};
use crate::index::{self, IssueIndex};

/// Directory that issue paths are resolved against
pub(crate) const ROOT: &str = ".";

/// Write the index back, reporting that nothing was persisted on failure
pub(crate) fn persist(index: &IssueIndex, path: &Path) -> Result<()> {
    index::save(index, path).map_err(|e| {
        WeeklyError::Index(format!(
            "Changes not saved to '{}': {}",
            path.display(),
            e
        ))
    })?;
    println!("Index updated: {}", path.display());
    Ok(())
}
