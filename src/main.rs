//! Property Cache - property listing service with a read-through cache
//!
//! Serves property records through a TTL read-through cache and reports the
//! backing store's hit/miss counters.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_cache::api::{create_router, PageCacheOptions};
use property_cache::cache::{
    BackingStore, InMemoryStore, MetricsAggregator, ReadThroughCache, RedisStore, RedisStoreConfig,
};
use property_cache::config::CacheBackend;
use property_cache::properties::{InMemoryPropertyRepository, PropertyRepository};
use property_cache::{spawn_cleanup_task, AppState, Config, PropertyService};

/// Main entry point for the property service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the backing store (and its sweeper for the memory backend)
/// 4. Load the property repository
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting property cache service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, cache_ttl={}s, page_cache_ttl={}s, port={}, coalesce_loads={}",
        config.cache_backend, config.cache_ttl, config.page_cache_ttl, config.server_port, config.coalesce_loads
    );

    let (store, cleanup_handle) = open_store(&config).await?;
    let repository = open_repository(&config).await?;

    let mut cache = ReadThroughCache::new(store.clone(), config.cache_ttl());
    if config.coalesce_loads {
        cache = cache.with_load_coalescing();
    }
    let service = PropertyService::new(repository, cache, MetricsAggregator::new(store));

    let page_cache = PageCacheOptions::methods_only(vec![Method::GET]).with_ttl(config.page_cache_ttl());
    let app = create_router(AppState::new(service).with_page_cache(page_cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Opens the configured backing store. The memory backend also gets its sweeper.
async fn open_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn BackingStore>, Option<JoinHandle<()>>)> {
    match config.cache_backend {
        CacheBackend::Memory => {
            let store = Arc::new(InMemoryStore::new());
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            info!("In-memory store initialized, cleanup task started");
            let store: Arc<dyn BackingStore> = store;
            Ok((store, Some(handle)))
        }
        CacheBackend::Redis => {
            let redis_config =
                RedisStoreConfig::new(config.redis_url.clone()).with_timeout(config.store_timeout());
            let store = RedisStore::connect(redis_config)
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?;
            info!("Connected to Redis at {}", config.redis_url);
            let store: Arc<dyn BackingStore> = Arc::new(store);
            Ok((store, None))
        }
    }
}

async fn open_repository(config: &Config) -> anyhow::Result<Arc<dyn PropertyRepository>> {
    let repository = match &config.properties_file {
        Some(path) => InMemoryPropertyRepository::from_json_file(path).await?,
        None => {
            warn!("PROPERTIES_FILE not set, starting with an empty property table");
            InMemoryPropertyRepository::default()
        }
    };
    Ok(Arc::new(repository))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
