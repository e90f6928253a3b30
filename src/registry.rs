//! Issue registry operations
//!
//! Mutates an in-memory `IssueIndex`; callers load and persist it.
//! Every mutating operation leaves `weeklies` sorted by start date.

use chrono::{Datelike, NaiveDate};
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analyzer::ContentAnalyzer;
use crate::config::Settings;
use crate::error::{Result, WeeklyError};
use crate::index::{ContentStats, IssueDate, IssueIndex, IssueRecord};
use crate::naming;

/// Marker that identifies a title carrying an issue number
pub const ISSUE_MARKER: char = '第';

const IMAGE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// Fields supplied when adding an issue by hand
#[derive(Debug, Clone)]
pub struct IssueDraft {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub title: String,
    pub summary: String,
    pub stats: ContentStats,
}

/// Whether `add_or_update` created a record or rewrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Updated,
}

/// Result of reconciling the index with the issues directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub added: usize,
    pub updated: usize,
    /// Records in the index after the scan
    pub total: usize,
}

impl ScanReport {
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Registry operations rooted at a working directory
pub struct Registry<'a> {
    settings: &'a Settings,
    root: &'a Path,
}

impl<'a> Registry<'a> {
    pub fn new(settings: &'a Settings, root: &'a Path) -> Self {
        Self { settings, root }
    }

    /// Directory scanned for issue pages
    pub fn issues_dir(&self) -> PathBuf {
        self.root.join(naming::ISSUES_DIR)
    }

    /// Add an issue, or overwrite the record with the same canonical filename
    pub fn add_or_update(
        &self,
        index: &mut IssueIndex,
        draft: IssueDraft,
    ) -> (AddOutcome, String) {
        let filename = naming::encode(draft.start, draft.end);
        let title = self.normalize_title(&draft.title);
        let published = self.root.join(&filename).exists();

        let outcome = match index.find_mut(&filename) {
            Some(existing) => {
                existing.title = title;
                existing.summary = draft.summary;
                existing.set_stats(draft.stats);
                existing.published = published;
                AddOutcome::Updated
            }
            None => {
                index.weeklies.push(IssueRecord {
                    date: IssueDate::from(draft.start),
                    end_date: IssueDate::from(draft.end),
                    filename: filename.clone(),
                    title,
                    summary: draft.summary,
                    news_count: draft.stats.news_count,
                    tool_count: draft.stats.tool_count,
                    tech_count: draft.stats.tech_count,
                    published,
                    blackboard_image: None,
                    extra: Map::new(),
                });
                AddOutcome::Added
            }
        };

        index.sort_by_date();
        (outcome, filename)
    }

    /// Reconcile the index with the issue pages present on disk
    ///
    /// Creates the issues directory when missing. Titles of all records are
    /// renumbered by chronological position afterwards.
    pub fn rescan(&self, index: &mut IssueIndex) -> Result<ScanReport> {
        let issues_dir = self.issues_dir();
        if !issues_dir.exists() {
            fs::create_dir_all(&issues_dir)?;
            println!("Created issues directory: {}", issues_dir.display());
        }

        let analyzer = ContentAnalyzer::new(self.settings.analyzer);
        let mut report = ScanReport::default();

        for entry in WalkDir::new(&issues_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable entry in {}: {}",
                        issues_dir.display(),
                        e
                    );
                    continue;
                }
            };

            if !entry.path().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            let Some((start, end)) = naming::decode(file_name) else {
                continue;
            };

            let filename = format!("{}/{}", naming::ISSUES_DIR, file_name);
            let stats = analyzer.analyze_file(entry.path());
            let image = self.find_image(start, end);
            log::debug!("Analyzed {}: {}", filename, stats);

            match index.find_mut(&filename) {
                None => {
                    println!("New issue: {} ({})", filename, describe(stats));
                    if let Some(image) = &image {
                        println!("Found blackboard image: {}", image);
                    }
                    index.weeklies.push(IssueRecord {
                        date: IssueDate::from(start),
                        end_date: IssueDate::from(end),
                        filename,
                        title: self.settings.product_name.clone(),
                        summary: default_summary(start),
                        news_count: stats.news_count,
                        tool_count: stats.tool_count,
                        tech_count: stats.tech_count,
                        published: true,
                        blackboard_image: image,
                        extra: Map::new(),
                    });
                    report.added += 1;
                }
                Some(existing) => {
                    if refresh(existing, stats, image) {
                        report.updated += 1;
                    }
                }
            }
        }

        index.sort_by_date();
        self.renumber(index);
        report.total = index.weeklies.len();
        Ok(report)
    }

    /// Mark the record with exactly this filename as published
    pub fn mark_published(&self, index: &mut IssueIndex, filename: &str) -> Result<()> {
        let record = index
            .find_mut(filename)
            .ok_or_else(|| WeeklyError::NotFound(filename.to_string()))?;
        record.published = true;
        index.sort_by_date();
        Ok(())
    }

    /// Retitle every record by its 1-based chronological position
    pub fn renumber(&self, index: &mut IssueIndex) {
        for (position, record) in index.weeklies.iter_mut().enumerate() {
            record.title = self.sequence_title(position + 1);
        }
    }

    pub fn sequence_title(&self, number: usize) -> String {
        format!("{} {}{}期", self.settings.product_name, ISSUE_MARKER, number)
    }

    /// Prefix the product name unless the title already carries an issue number
    pub fn normalize_title(&self, title: &str) -> String {
        if title.contains(ISSUE_MARKER) {
            title.to_string()
        } else {
            format!("{} {}", self.settings.product_name, title)
        }
    }

    /// First existing companion image for the range, `.png` before `.jpg`
    fn find_image(&self, start: NaiveDate, end: NaiveDate) -> Option<String> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| naming::image_path(&self.settings.image_prefix, start, end, ext))
            .find(|relative| self.root.join(relative).is_file())
    }
}

/// Apply a fresh analysis to an existing record; true if anything changed
fn refresh(record: &mut IssueRecord, stats: ContentStats, image: Option<String>) -> bool {
    let mut changed = false;

    if let Some(image) = image {
        if record.blackboard_image.as_deref() != Some(image.as_str()) {
            println!("Updated blackboard image: {} -> {}", record.filename, image);
            record.blackboard_image = Some(image);
            changed = true;
        }
    }

    if !record.published {
        record.published = true;
        println!("Marked published: {}", record.filename);
        changed = true;
    }

    let old_stats = record.stats();
    if old_stats != stats {
        record.set_stats(stats);
        println!("Updated stats: {} ({} -> {})", record.filename, old_stats, stats);
        changed = true;
    }

    changed
}

fn default_summary(start: NaiveDate) -> String {
    format!(
        "{}年{:02}月的AI圈精彩内容，包含最新的技术突破和工具发布。",
        start.year(),
        start.month()
    )
}

/// Human-readable stats line used in progress output
pub fn describe(stats: ContentStats) -> String {
    format!(
        "{} news, {} tools, {} releases",
        stats.news_count, stats.tool_count, stats.tech_count
    )
}
