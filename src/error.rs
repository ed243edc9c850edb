use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Network error reaching record store: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed page response: {0}")]
    MalformedResponse(String),

    #[error("Store reports {total_pages} pages, above the limit of {limit}")]
    PageLimitExceeded { total_pages: u32, limit: u32 },

    #[error("Refresh cycle did not complete within {0:?}")]
    CycleTimeout(Duration),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Snapshot publish error: {0}")]
    Snapshot(#[from] tempfile::PersistError),
}

impl SyncError {
    /// Short text for the status widget. Full details go to the log.
    pub fn status_message(&self) -> String {
        match self {
            SyncError::Network(_) => "Store connection error".to_string(),
            SyncError::Http { status, .. } => format!("Store error (HTTP {})", status),
            SyncError::MalformedResponse(_) => "Unexpected response from store".to_string(),
            SyncError::PageLimitExceeded { .. } => "Too many pages in store response".to_string(),
            SyncError::CycleTimeout(_) => "Refresh timed out".to_string(),
            other => format!("Error: {}", other),
        }
    }
}
