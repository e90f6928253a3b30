//! Canonical issue file naming
//!
//! Maps a date range to `weeklies/{start}-{end}issue-report.html` and back.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Directory holding issue pages, relative to the working directory
pub const ISSUES_DIR: &str = "weeklies";

/// Subdirectory of `ISSUES_DIR` holding companion images
pub const IMAGES_DIR: &str = "images";

const FILE_SUFFIX: &str = "issue-report.html";

static ISSUE_FILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})-(\d{4})(\d{2})(\d{2})issue-report\.html$")
        .expect("issue file pattern is valid")
});

/// Canonical relative path of the issue covering `start..=end`
pub fn encode(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}/{}{}", ISSUES_DIR, date_stem(start, end), FILE_SUFFIX)
}

/// Compact `YYYYMMDD-YYYYMMDD` form shared by issue and image names
pub fn date_stem(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}-{}", start.format("%Y%m%d"), end.format("%Y%m%d"))
}

/// Recover the date range from a bare issue file name
///
/// Returns `None` for names that do not follow the canonical pattern,
/// including well-formed names carrying impossible dates.
pub fn decode(file_name: &str) -> Option<(NaiveDate, NaiveDate)> {
    let caps = ISSUE_FILE_RE.captures(file_name)?;
    let start = ymd(&caps[1], &caps[2], &caps[3])?;
    let end = ymd(&caps[4], &caps[5], &caps[6])?;
    Some((start, end))
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-{}-{}", year, month, day), "%Y-%m-%d").ok()
}

/// Relative path of a companion image inside `weeklies/images`
pub fn image_path(prefix: &str, start: NaiveDate, end: NaiveDate, ext: &str) -> String {
    format!(
        "{}/{}/{}_{}.{}",
        ISSUES_DIR,
        IMAGES_DIR,
        prefix,
        date_stem(start, end),
        ext
    )
}
