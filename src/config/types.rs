use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Weekly index tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON index document holding all issue records
    pub index_file: PathBuf,

    /// Product name used as the title prefix
    pub product_name: String,

    /// File name prefix of companion blackboard images
    pub image_prefix: String,

    /// Content analyzer tuning
    pub analyzer: AnalyzerSettings,
}

/// Normalization applied to keyword counts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Keyword matches per logical mention (rounded up)
    pub divisor: u32,

    /// Upper bound for tool and release counts
    pub max_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from("weekly-config.json"),
            product_name: "AI圈热点周报".to_string(),
            image_prefix: "ai_weekly_blackboard".to_string(),
            analyzer: AnalyzerSettings::default(),
        }
    }
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            divisor: 3,
            max_count: 10,
        }
    }
}
