//! Error types for Samle.

use thiserror::Error;

/// Library-level error type for Samle operations.
#[derive(Error, Debug)]
pub enum SamleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is not configured. Please check your API key.")]
    NotConfigured(String),

    #[error("Transcript source error: {0}")]
    TranscriptSource(String),

    #[error("Transcript not available: {0}")]
    TranscriptUnavailable(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Samle operations.
pub type Result<T> = std::result::Result<T, SamleError>;
