use chrono::NaiveDate;
use std::path::Path;

use crate::config;
use crate::error::{Result, WeeklyError};
use crate::index::{self, ContentStats};
use crate::registry::{self, AddOutcome, IssueDraft, Registry};

/// Add an issue record, or update the one with the same date range
pub fn run(
    settings_path: &Path,
    start: &str,
    end: &str,
    title: String,
    summary: String,
    stats: ContentStats,
) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let settings = config::load(settings_path)?;
    let mut index = index::load(&settings.index_file)?;

    let registry = Registry::new(&settings, Path::new(super::ROOT));
    let draft = IssueDraft {
        start,
        end,
        title,
        summary,
        stats,
    };
    let (outcome, filename) = registry.add_or_update(&mut index, draft);

    if outcome == AddOutcome::Updated {
        println!("Issue already exists, updating record");
    }

    super::persist(&index, &settings.index_file)?;

    println!("Added/updated issue: {}", filename);
    println!("Stats: {}", registry::describe(stats));

    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| WeeklyError::InvalidDate(value.to_string()))
}
