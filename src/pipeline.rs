use crate::collector::Collector;
use crate::config::Config;
use crate::publisher::Publisher;
use crate::summarizer::Summarizer;
use crate::types::{Result, UploadStats};
use tracing::info;

/// Outcome of one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    /// Articles collected across all sources.
    pub fetched: usize,
    /// Upload counts; `None` when nothing was fetched and no request
    /// was made.
    pub uploaded: Option<UploadStats>,
}

/// Run the whole fetch → summarize → upload pipeline once.
///
/// Validation failures and upload failures propagate to the caller;
/// everything below that is isolated per source or per article inside
/// its stage. An all-sources-empty run is a success with no upload.
pub async fn run(config: &Config) -> Result<PipelineReport> {
    config.validate()?;

    info!(
        "AI summary: {}",
        if config.summarization_active() { "enabled" } else { "disabled" }
    );
    info!("ingestion endpoint: {}", config.api_url);
    info!("{} feed sources configured", config.sources.len());

    let collector = Collector::new(config);
    let mut articles = collector.collect_all(&config.sources).await;
    info!("collected {} articles in total", articles.len());

    if articles.is_empty() {
        info!("nothing fetched, skipping upload");
        return Ok(PipelineReport {
            fetched: 0,
            uploaded: None,
        });
    }

    if let Some(summarizer) = Summarizer::from_config(config) {
        summarizer.rewrite_all(&mut articles).await;
    }

    let publisher = Publisher::new(config);
    let stats = publisher.upload(&articles).await?;

    Ok(PipelineReport {
        fetched: articles.len(),
        uploaded: Some(stats),
    })
}
