use crate::config::{self, Settings};
use crate::error::Result;
use std::path::PathBuf;

/// Initialize weekly.toml settings file
pub fn init(path: PathBuf) -> Result<()> {
    if path.exists() {
        eprintln!("Settings file already exists at: {}", path.display());
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    let settings = Settings::default();
    config::save(&settings, &path)?;

    println!("Settings file created: {}", path.display());
    println!("\nNext steps:");
    println!("1. Edit {} to set the product name", path.display());
    println!("2. Run 'weekly-index scan' to index existing issues");

    Ok(())
}
