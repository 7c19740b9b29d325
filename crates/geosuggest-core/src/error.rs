// crates/geosuggest-core/src/error.rs
use thiserror::Error;

/// Errors produced by the suggestion core.
///
/// Note that [`crate::SuggestCoordinator::search`] never surfaces any of
/// these: per-query failures are absorbed by the dispatcher and a superseded
/// session is discarded silently. Only construction-time operations
/// (configuration, HTTP client setup, query building) return them directly.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("HTTP request failed: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    #[error("Malformed upstream response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid upstream URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Upstream request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Search was cancelled")]
    Cancelled,

    #[error("No Tokio runtime available; the coordinator must be created inside one")]
    NoRuntime,

    #[error("Illegal session transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl From<figment::Error> for SuggestError {
    fn from(e: figment::Error) -> Self {
        SuggestError::Config(Box::new(e))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for SuggestError {
    fn from(e: reqwest::Error) -> Self {
        SuggestError::Http(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, SuggestError>;
