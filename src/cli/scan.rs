use std::path::Path;

use crate::config;
use crate::error::Result;
use crate::index;
use crate::registry::Registry;

/// Scan the weeklies directory and reconcile the index with it
pub fn run(settings_path: &Path) -> Result<()> {
    let settings = config::load(settings_path)?;
    let mut index = index::load(&settings.index_file)?;

    let registry = Registry::new(&settings, Path::new(super::ROOT));
    println!("Scanning {}...", registry.issues_dir().display());

    let report = registry.rescan(&mut index)?;

    if !report.has_changes() {
        println!("Scan complete: no new files found");
        return Ok(());
    }

    super::persist(&index, &settings.index_file)?;

    println!(
        "Scan complete: {} new, {} updated",
        report.added, report.updated
    );
    println!("Renumbered {} issues", report.total);

    Ok(())
}
