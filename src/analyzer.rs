//! Content analyzer
//!
//! Estimates news, tool and release counts of an issue page by marker and
//! keyword frequency. The numbers are editorial hints, not exact parses.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::config::AnalyzerSettings;
use crate::index::ContentStats;

/// Class names used by the two generations of issue templates
const NEWS_MARKERS: [&str; 2] = [r#"class="news-item""#, r#"class="news-card""#];

static TOOL_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)工具|tool|AI.*生成器|生成.*工具|创作.*工具|AI.*助手")
        .expect("tool keyword pattern is valid")
});

static RELEASE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)发布|推出|上线|更新|升级|推送|推广|release|launch|update")
        .expect("release keyword pattern is valid")
});

/// Scores issue pages using fixed marker and keyword sets
pub struct ContentAnalyzer {
    settings: AnalyzerSettings,
}

impl ContentAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    /// Analyze an issue page on disk; unreadable files score zero
    ///
    /// Bytes that are not valid UTF-8 are replaced, not rejected.
    pub fn analyze_file(&self, path: &Path) -> ContentStats {
        match fs::read(path) {
            Ok(bytes) => self.analyze(&String::from_utf8_lossy(&bytes)),
            Err(e) => {
                log::warn!("Cannot analyze file {}: {}", path.display(), e);
                ContentStats::default()
            }
        }
    }

    /// Analyze HTML text already in memory
    pub fn analyze(&self, html: &str) -> ContentStats {
        let news_count = NEWS_MARKERS
            .iter()
            .map(|marker| html.matches(marker).count())
            .max()
            .unwrap_or(0);

        ContentStats {
            news_count: saturate(news_count),
            tool_count: self.keyword_score(html, &TOOL_KEYWORDS),
            tech_count: self.keyword_score(html, &RELEASE_KEYWORDS),
        }
    }

    fn keyword_score(&self, html: &str, keywords: &Regex) -> u32 {
        keyword_score(
            html,
            keywords,
            self.settings.divisor,
            self.settings.max_count,
        )
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerSettings::default())
    }
}

/// Count keyword matches, divide rounding up, and clamp
pub fn keyword_score(text: &str, keywords: &Regex, divisor: u32, max: u32) -> u32 {
    let matches = saturate(keywords.find_iter(text).count());
    matches.div_ceil(divisor.max(1)).min(max)
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
