//! Cache Ledger - an instrumented key-value cache
//!
//! Serves the instrumented cache, its replay, and the page cache over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_ledger::api::create_router;
use cache_ledger::{spawn_cleanup_task, AppState, Config, MemoryStore, SharedStore};

/// Main entry point for the cache ledger server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the key-value store (Redis or in-process)
/// 4. Flush it and build the cache, instrumentation and page cache
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_ledger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cache Ledger Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, page_cache_ttl={}s, count_policy={:?}, cleanup_interval={}s",
        config.server_port, config.page_cache_ttl, config.count_policy, config.cleanup_interval
    );

    let (store, cleanup_handle) = connect_store(&config).await?;

    let state = AppState::from_config(store, &config)
        .await
        .context("failed to initialize cache")?;
    info!("Cache initialized on a flushed store");

    let app = create_router(state);

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

type StoreHandles = (SharedStore, Option<JoinHandle<()>>);

/// Picks the store backend; only the in-process store needs a sweeper task.
async fn connect_store(config: &Config) -> anyhow::Result<StoreHandles> {
    if let Some(url) = &config.redis_url {
        return connect_redis(url).await;
    }

    let store = MemoryStore::new();
    let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
    info!("In-process store ready, background cleanup task started");
    Ok((Arc::new(store), Some(handle)))
}

#[cfg(feature = "redis")]
async fn connect_redis(url: &str) -> anyhow::Result<StoreHandles> {
    let store = cache_ledger::store::RedisStore::connect(url)
        .await
        .context("failed to connect to Redis")?;
    Ok((Arc::new(store), None))
}

#[cfg(not(feature = "redis"))]
async fn connect_redis(_url: &str) -> anyhow::Result<StoreHandles> {
    anyhow::bail!("REDIS_URL is set but this build was compiled without the redis feature")
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
