pub mod collector;
pub mod config;
pub mod pipeline;
pub mod publisher;
pub mod summarizer;
pub mod text;
pub mod types;

pub use collector::{parse_articles, Collector};
pub use config::Config;
pub use pipeline::{run, PipelineReport};
pub use publisher::Publisher;
pub use summarizer::Summarizer;
pub use types::{Article, FeedSource, FetchError, Result, UploadStats};
