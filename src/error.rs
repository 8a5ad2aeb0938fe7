use thiserror::Error;

/// Main error type for the ranking resolution engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Ranking page could not be retrieved
    #[error("Fetch failed for {mode} rankings: {message}")]
    FetchFailed { mode: String, message: String },

    /// No table-shaped region detected in the source document
    #[error("No ranking table found in source document")]
    NoTableFound,

    /// A table was found but no usable name/rating rows came out of it
    #[error("Ranking table has no recognizable name/rating columns")]
    UnrecognizedShape,

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
