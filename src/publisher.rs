use crate::config::Config;
use crate::types::{Article, FetchError, Result, UploadStats};
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

/// Submits the collected batch to the ingestion endpoint in one request.
pub struct Publisher {
    client: Client,
    api_url: String,
    api_key: String,
}

impl Publisher {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.upload_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Upload the batch. An empty batch is a trivial success with no
    /// request sent. One attempt only; the caller decides the exit code.
    pub async fn upload(&self, articles: &[Article]) -> Result<UploadStats> {
        if articles.is_empty() {
            return Ok(UploadStats::default());
        }

        info!("uploading {} articles to {}", articles.len(), self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .json(articles)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.api_url.clone())
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_upload_status(status, &self.api_url));
        }

        let body = response.text().await?;
        let stats = parse_upload_stats(&body);
        info!("upload accepted: {} inserted, {} skipped", stats.inserted, stats.skipped);
        Ok(stats)
    }
}

/// 401 gets its own variant so the caller can point at the credential
/// rather than a generic HTTP failure.
pub fn classify_upload_status(status: StatusCode, url: &str) -> FetchError {
    if status == StatusCode::UNAUTHORIZED {
        FetchError::Unauthorized
    } else {
        FetchError::Status {
            status,
            url: url.to_string(),
        }
    }
}

/// Decode `inserted`/`skipped` counts, defaulting to zero when the body
/// is missing fields or is not valid JSON at all.
pub fn parse_upload_stats(body: &str) -> UploadStats {
    match serde_json::from_str::<UploadStats>(body) {
        Ok(stats) => stats,
        Err(e) => {
            warn!("could not decode upload response ({}), assuming zero counts", e);
            UploadStats::default()
        }
    }
}
