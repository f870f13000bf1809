use news_fetcher::{pipeline, Config, FetchError};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("starting RSS news fetcher");

    let config = Config::from_env();

    match pipeline::run(&config).await {
        Ok(report) => {
            match report.uploaded {
                Some(stats) => info!(
                    "done: {} fetched, {} inserted, {} skipped",
                    report.fetched, stats.inserted, stats.skipped
                ),
                None => info!("done: no articles fetched"),
            }
            Ok(())
        }
        Err(e) => {
            if e.is_credential_error() {
                error!("upload rejected: check the API_KEY configuration");
            }
            match &e {
                FetchError::Config(msg) => error!("configuration error: {}", msg),
                other => error!("pipeline failed: {}", other),
            }
            Err(e.into())
        }
    }
}
