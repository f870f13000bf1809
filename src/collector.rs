use crate::config::Config;
use crate::text::{strip_html, truncate_chars};
use crate::types::{Article, FeedSource, FetchError, Result};
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Upper bound on a cleaned summary, keeping the batch payload small.
pub const MAX_SUMMARY_CHARS: usize = 500;

/// Fetches each configured feed and normalizes its entries into articles.
pub struct Collector {
    client: Client,
    courtesy_delay: std::time::Duration,
}

impl Collector {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(concat!("news-fetcher/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            courtesy_delay: config.courtesy_delay,
        }
    }

    /// Fetch every source in order, concatenating results. A failing
    /// source logs a warning and contributes nothing; the run continues.
    pub async fn collect_all(&self, sources: &[FeedSource]) -> Vec<Article> {
        let mut all = Vec::new();

        for (i, source) in sources.iter().enumerate() {
            info!("[{}/{}] fetching {} ({})", i + 1, sources.len(), source.name, source.url);

            match self.fetch_source(source).await {
                Ok(articles) => {
                    info!("{}: {} articles", source.name, articles.len());
                    all.extend(articles);
                }
                Err(FetchError::Timeout(url)) => {
                    warn!("{}: timed out fetching {}", source.name, url);
                }
                Err(e) => {
                    warn!("{}: {}", source.name, e);
                }
            }

            // Pacing between feed hosts, skipped after the last source.
            if i + 1 < sources.len() && !self.courtesy_delay.is_zero() {
                tokio::time::sleep(self.courtesy_delay).await;
            }
        }

        all
    }

    /// Fetch and parse a single feed. Errors are source-level and are
    /// consumed by `collect_all`.
    pub async fn fetch_source(&self, source: &FeedSource) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(&source.url)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, &source.url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: source.url.clone(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(e, &source.url))?;
        debug!("{}: {} feed bytes", source.name, body.len());

        parse_articles(&body, &source.name)
    }
}

fn classify_transport_error(err: reqwest::Error, url: &str) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Http(err)
    }
}

/// Parse raw feed bytes into normalized articles, preserving document
/// order. Entries without a title or link are dropped.
pub fn parse_articles(bytes: &[u8], source_name: &str) -> Result<Vec<Article>> {
    let feed = parser::parse(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut articles = Vec::new();
    for entry in feed.entries {
        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();
        let link = entry
            .links
            .first()
            .map(|l| l.href.trim().to_string())
            .unwrap_or_default();

        if title.is_empty() || link.is_empty() {
            debug!("{}: skipping entry without title or link", source_name);
            continue;
        }

        // RSS <description> and Atom <summary> both land in `summary`;
        // fall back to the full content body when neither is present.
        let raw_summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        let summary = truncate_chars(&strip_html(&raw_summary), MAX_SUMMARY_CHARS);

        articles.push(Article {
            title,
            external_id: link.clone(),
            url: link,
            source: source_name.to_string(),
            summary,
            raw_summary,
        });
    }

    Ok(articles)
}
