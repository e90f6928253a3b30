use thiserror::Error;

/// Weekly index error types
#[derive(Error, Debug)]
pub enum WeeklyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Index file error: {0}")]
    Index(String),

    #[error("Issue not found: {0}")]
    NotFound(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for weekly index operations
pub type Result<T> = std::result::Result<T, WeeklyError>;
