//! Happy Days memory engine
//!
//! Serves the capture → annotate → transcribe → search pipeline over HTTP:
//! photos and recordings come in as bytes, memories come back as base-named
//! artifact sets searchable by transcript text.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use happy_days::index::{Index, SearchIndex};
use happy_days::server::run_server;
use happy_days::transcribe::HttpTranscriber;
use happy_days::{HappyDaysConfig, Memories, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("happy_days=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = HappyDaysConfig::from_env();
    tracing::info!(
        storage = %config.storage_dir.display(),
        scratch = %config.scratch_dir.display(),
        "starting memory engine"
    );

    let store = Arc::new(MemoryStore::new(&config.storage_dir)?);
    let index: Arc<dyn Index> = Arc::new(SearchIndex::from_config(&config));
    let transcriber = Arc::new(HttpTranscriber::new(
        config.speech_url.clone(),
        config.speech_locale.clone(),
    ));

    let memories = Arc::new(Memories::new(store, index, transcriber));

    // The in-process index is empty at boot; a remote one keeps its state.
    if !config.use_remote_index {
        memories.reindex().await?;
    }

    run_server(memories, &config).await
}
