use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{self, IssueDate};

/// The persisted registry of newsletter issues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueIndex {
    /// Issue records, kept sorted by start date
    #[serde(default)]
    pub weeklies: Vec<IssueRecord>,

    /// Site settings owned by other tools; carried through untouched
    #[serde(default)]
    pub settings: Map<String, Value>,

    /// Unrecognized top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single newsletter edition
///
/// Fields decode leniently so one odd value never discards the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    /// Range start
    #[serde(default)]
    pub date: IssueDate,
    /// Range end
    #[serde(default)]
    pub end_date: IssueDate,
    /// Canonical relative path, unique within the index
    #[serde(default, deserialize_with = "lenient::text")]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub news_count: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub tool_count: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub tech_count: u32,
    /// Whether the issue file exists on disk
    #[serde(default, deserialize_with = "lenient::flag")]
    pub published: bool,
    /// Companion blackboard image, relative path
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub blackboard_image: Option<String>,

    /// Unrecognized per-record keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Heuristic content statistics of one issue page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub news_count: u32,
    pub tool_count: u32,
    pub tech_count: u32,
}

impl IssueIndex {
    /// Find a record by exact filename
    pub fn find_mut(&mut self, filename: &str) -> Option<&mut IssueRecord> {
        self.weeklies.iter_mut().find(|w| w.filename == filename)
    }

    /// Stable sort ascending by start date, unparsable dates last
    pub fn sort_by_date(&mut self) {
        self.weeklies.sort_by_key(|w| w.date.sort_key());
    }
}

impl IssueRecord {
    pub fn stats(&self) -> ContentStats {
        ContentStats {
            news_count: self.news_count,
            tool_count: self.tool_count,
            tech_count: self.tech_count,
        }
    }

    pub fn set_stats(&mut self, stats: ContentStats) {
        self.news_count = stats.news_count;
        self.tool_count = stats.tool_count;
        self.tech_count = stats.tech_count;
    }
}

impl std::fmt::Display for ContentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.news_count, self.tool_count, self.tech_count
        )
    }
}
