//! UDP Cache - A minimal authenticated key-value cache over UDP
//!
//! Server binary: binds the configured UDP port and serves until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use udp_cache::auth::StaticCredentials;
use udp_cache::cache::ExpiringCache;
use udp_cache::{spawn_cleanup_task, Config, Dispatcher, SessionTable, UdpCacheServer};

/// Main entry point for the UDP cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache, session table and credential verifier
/// 4. Start background idle sweep task
/// 5. Bind the UDP socket (failure aborts the process)
/// 6. Serve datagrams until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "udp_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting UDP Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_timeout={}ms, cleanup_interval={}ms, max_datagram_size={}",
        config.server_port, config.cache_timeout_ms, config.cleanup_interval_ms, config.max_datagram_size
    );

    let cache = ExpiringCache::new(config.cache_timeout()).shared();
    let dispatcher = Dispatcher::new(
        cache.clone(),
        Arc::new(SessionTable::new()),
        Arc::new(StaticCredentials::from_config(&config)),
    );

    let cleanup_handle = spawn_cleanup_task(cache, config.cleanup_interval());
    info!("Background idle sweep task started");

    let server = UdpCacheServer::bind(&config, dispatcher)
        .await
        .context("Failed to start cache server")?;

    tokio::select! {
        result = server.run() => result?,
        _ = shutdown_signal() => {}
    }

    cleanup_handle.abort();
    warn!("Idle sweep task aborted");
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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
}
