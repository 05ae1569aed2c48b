//! docsite-search - Main entry point
//!
//! Serves in-page search over a rendered documentation site through the
//! Model Context Protocol (MCP) on stdio.

use anyhow::Result;
use docsite_search::preferences::{JsonFilePreferenceStore, PreferenceStore};
use docsite_search::{source, Config, DocSearchMcpServer, MetricsTracker};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting docsite-search over {}", config.docs_source);

    let metrics = MetricsTracker::new();
    let pages = source::from_config(&config, metrics.clone());
    let store = Arc::new(JsonFilePreferenceStore::new(&config.preferences_path))
        as Arc<dyn PreferenceStore>;

    let server = DocSearchMcpServer::new(
        pages,
        store,
        config.page_cache_ttl_secs(),
        config.toc_min_headings,
        metrics.clone(),
    );

    match server.search_tools().warm_all().await {
        Ok(count) => info!("Indexed {} pages", count),
        Err(e) => warn!("Index warm-up skipped: {}", e),
    }
    info!(
        "Index cache TTL: {} minutes ({} seconds)",
        config.page_cache_ttl_minutes,
        config.page_cache_ttl_secs()
    );

    info!("Starting MCP server with stdio transport");
    docsite_search::server::run_server(server).await?;

    info!("Shutdown complete: {}", metrics.summary());
    Ok(())
}
