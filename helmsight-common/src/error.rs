use thiserror::Error;

/// Common error type for Helmsight components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("History query failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using Helmsight's Error.
pub type Result<T> = std::result::Result<T, Error>;
