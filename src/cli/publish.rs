use std::path::Path;

use crate::config;
use crate::error::Result;
use crate::index;
use crate::registry::Registry;

/// Mark the issue stored under `filename` as published
pub fn run(settings_path: &Path, filename: &str) -> Result<()> {
    let settings = config::load(settings_path)?;
    let mut index = index::load(&settings.index_file)?;

    let registry = Registry::new(&settings, Path::new(super::ROOT));
    registry.mark_published(&mut index, filename)?;

    super::persist(&index, &settings.index_file)?;
    println!("Marked as published: {}", filename);

    Ok(())
}
