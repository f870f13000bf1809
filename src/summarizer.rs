use crate::config::Config;
use crate::text::{strip_html, truncate_chars};
use crate::types::{Article, FetchError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

const GROQ_MODEL: &str = "llama-3.3-8b-instant";

/// Cap on prompt input; long feed bodies waste tokens without improving
/// the rewrite.
pub const MAX_PROMPT_INPUT_CHARS: usize = 1000;

/// Rewrites article summaries through Groq's OpenAI-compatible chat API.
///
/// Construction is gated on configuration: when the stage is disabled or
/// no key is present there is no `Summarizer` at all, so the identity
/// path cannot accidentally perform network calls.
pub struct Summarizer {
    client: Client,
    endpoint: String,
    api_key: String,
    courtesy_delay: std::time::Duration,
}

impl Summarizer {
    /// Returns `None` when AI summarization is disabled or unconfigured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.ai_summary_enabled {
            info!("AI summary disabled, keeping original summaries");
            return None;
        }
        let api_key = match &config.groq_api_key {
            Some(key) => key.clone(),
            None => {
                info!("GROQ_API_KEY not set, keeping original summaries");
                return None;
            }
        };

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Some(Self {
            client,
            endpoint: config.groq_api_url.clone(),
            api_key,
            courtesy_delay: config.courtesy_delay,
        })
    }

    /// Rewrite summaries one article at a time, in order. Any per-item
    /// failure leaves that article's summary untouched and never affects
    /// its siblings or the run.
    pub async fn rewrite_all(&self, articles: &mut [Article]) {
        let total = articles.len();
        info!("rewriting {} summaries with {}", total, GROQ_MODEL);

        for (i, article) in articles.iter_mut().enumerate() {
            debug!("[{}/{}] summarizing: {}", i + 1, total, article.title);

            match self.rewrite_one(article).await {
                Ok(summary) if !summary.is_empty() => article.summary = summary,
                Ok(_) => debug!("empty model output, keeping original summary"),
                Err(e) => warn!("summary rewrite failed for {}: {}", article.url, e),
            }

            // Provider rate-limit pacing, skipped after the last item.
            if i + 1 < total && !self.courtesy_delay.is_zero() {
                tokio::time::sleep(self.courtesy_delay).await;
            }
        }
    }

    async fn rewrite_one(&self, article: &Article) -> Result<String> {
        let prompt = build_prompt(&article.title, &article.raw_summary);

        let body = serde_json::json!({
            "model": GROQ_MODEL,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.3,
            "max_tokens": 200,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Summarize(format!("provider returned HTTP {}", status)));
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}

/// Builds the rewrite prompt: Chinese, at most 100 characters, no
/// prefix or explanation. The length bound is a prompt instruction only;
/// the model's output is taken as-is.
pub fn build_prompt(title: &str, raw_summary: &str) -> String {
    let clean = truncate_chars(strip_html(raw_summary).trim(), MAX_PROMPT_INPUT_CHARS);

    format!(
        "你是一个科技新闻编辑。请阅读以下新闻标题和原始摘要，用**中文**写一段简短的总结（不超过 100 字）。\n\
         去除非核心信息，直击要点。如果原始内容已经是中文，则优化其表达。\n\n\
         标题：{}\n\n\
         摘要：{}\n\n\
         请直接输出优化后的摘要，不要加任何前缀或解释。",
        title, clean
    )
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}
