#![forbid(unsafe_code)]

//! HTTP server exposing purchase summaries at `/resumen/:date`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use summary::{InMemoryCache, RemoteSource, SummaryCache, SummaryStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;

use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "summary=debug,summary_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    info!(?config, "Loaded configuration");

    let source = RemoteSource::with_base_url(&config.source_url, config.source_timeout)?;
    let cache: Arc<dyn SummaryCache> = match config.cache_ttl {
        Some(ttl) => {
            let cache = Arc::new(InMemoryCache::with_ttl(ttl));
            spawn_stale_sweep(cache.clone(), ttl);
            cache
        }
        None => Arc::new(InMemoryCache::new()),
    };
    let store = SummaryStore::with_cache(Arc::new(source), cache);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server initialized on {}!", address);

    axum::serve(listener, routes::router(store)).await?;
    Ok(())
}

/// Periodically drop expired summaries so a TTL-bounded cache also stays bounded in memory.
fn spawn_stale_sweep(cache: Arc<InMemoryCache>, ttl: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ttl.max(Duration::from_secs(1)));
        loop {
            interval.tick().await;
            if let Err(e) = cache.invalidate_stale(ttl).await {
                warn!(error = %e, "Failed to sweep stale summaries");
            }
        }
    });
}
