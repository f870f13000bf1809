use serde::{Deserialize, Serialize};

/// A single normalized news item carried through the pipeline.
///
/// Created by the collector, optionally rewritten in place by the
/// summarizer (summary field only), read-only for the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: String,
    /// Original feed summary before HTML stripping, kept so the
    /// summarizer always works from unmutated input.
    pub raw_summary: String,
    /// Deduplication key used by the ingestion endpoint; equals `url`.
    pub external_id: String,
}

/// A configured feed endpoint, identified by display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Counts reported by the ingestion endpoint after an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStats {
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub skipped: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("ingestion API rejected the key (HTTP 401), check API_KEY")]
    Unauthorized,

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("summarization failed: {0}")]
    Summarize(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// True when the failure points at a bad ingestion credential.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, FetchError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
