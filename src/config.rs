use crate::types::{FeedSource, FetchError, Result};
use std::env;
use std::time::Duration;
use url::Url;

const PLACEHOLDER_URL: &str = "YOUR_WORKER_URL";
const PLACEHOLDER_KEY: &str = "YOUR_API_KEY";

/// Groq's OpenAI-compatible chat endpoint.
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Runtime configuration for one pipeline invocation.
///
/// Defaults come from `Default`, the environment layers on top via
/// `from_env`, and tests construct the struct directly to inject fake
/// endpoints without touching process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ingestion endpoint, e.g. `https://news-api.example.workers.dev/add`.
    pub api_url: String,
    /// Key sent in the `x-api-key` header.
    pub api_key: String,
    /// Groq API key; summarization is skipped when absent.
    pub groq_api_key: Option<String>,
    /// Chat-completions endpoint; overridable for OpenAI-compatible
    /// providers and for tests.
    pub groq_api_url: String,
    /// Master switch for AI summary rewriting.
    pub ai_summary_enabled: bool,
    /// Per-feed fetch timeout.
    pub request_timeout: Duration,
    /// Batch upload timeout, longer since the payload and server-side
    /// processing are bigger.
    pub upload_timeout: Duration,
    /// Pause between sequential calls to external hosts.
    pub courtesy_delay: Duration,
    /// Ordered feed list; processed in declaration order.
    pub sources: Vec<FeedSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: format!("https://{}/add", PLACEHOLDER_URL),
            api_key: String::new(),
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            ai_summary_enabled: true,
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(60),
            courtesy_delay: Duration::from_secs(1),
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Build a config from the process environment, falling back to
    /// built-in defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_first(&["NEWS_API_URL", "API_URL"]) {
            config.api_url = url;
        }
        if let Some(key) = env_first(&["NEWS_API_KEY", "API_KEY"]) {
            config.api_key = key;
        }
        config.groq_api_key = env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());
        if let Some(url) = env_first(&["GROQ_API_URL"]) {
            config.groq_api_url = url;
        }

        if let Ok(flag) = env::var("ENABLE_AI_SUMMARY") {
            config.ai_summary_enabled = is_truthy(&flag);
        }
        if let Some(secs) = env_secs("REQUEST_TIMEOUT") {
            config.request_timeout = secs;
        }
        if let Some(secs) = env_secs("UPLOAD_TIMEOUT") {
            config.upload_timeout = secs;
        }

        config
    }

    /// Pre-flight validation. Fails before any network call when the
    /// ingestion endpoint or key is missing or still a placeholder.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() || self.api_url.contains(PLACEHOLDER_URL) {
            return Err(FetchError::Config(
                "API_URL is not configured (set NEWS_API_URL or API_URL)".to_string(),
            ));
        }
        let parsed = Url::parse(&self.api_url)
            .map_err(|e| FetchError::Config(format!("API_URL is not a valid URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FetchError::Config(format!(
                "API_URL must be http(s), got {}",
                parsed.scheme()
            )));
        }
        if self.api_key.is_empty() || self.api_key.contains(PLACEHOLDER_KEY) {
            return Err(FetchError::Config(
                "API_KEY is not configured (set NEWS_API_KEY or API_KEY)".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the summarizer stage will actually call the provider.
    pub fn summarization_active(&self) -> bool {
        self.ai_summary_enabled && self.groq_api_key.is_some()
    }
}

/// Truthy flag values accepted from the environment.
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1")
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|v| !v.is_empty())
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("Hacker News", "https://news.ycombinator.com/rss"),
        FeedSource::new("V2EX", "https://www.v2ex.com/index.xml"),
        FeedSource::new("36氪", "https://36kr.com/feed"),
        FeedSource::new("少数派", "https://sspai.com/feed"),
        FeedSource::new("TechCrunch", "https://techcrunch.com/feed/"),
        FeedSource::new("The Verge", "https://www.theverge.com/rss/index.xml"),
    ]
}
