//! Squadstats - rate-limited, cached client for a team's player statistics
//!
//! Serves the team website's stats data from a TTL cache, going upstream
//! through a sliding-window request scheduler on misses.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use squadstats::api::{create_router, AppState};
use squadstats::cache::TtlCache;
use squadstats::config::Config;
use squadstats::fetch::CachedFetcher;
use squadstats::scheduler::RequestScheduler;
use squadstats::service::TeamStatsService;
use squadstats::tasks::spawn_sweep_task;
use squadstats::upstream::StatsApi;

/// Main entry point for the stats service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the shared cache, scheduler, upstream client, and service
/// 4. Start the background TTL sweep task
/// 5. Create the Axum router with all endpoints
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squadstats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting squadstats service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, roster={} players, success_ttl={:?}, failure_ttl={:?}, \
         {} requests per {:?} window",
        config.server_port,
        config.roster.len(),
        config.success_ttl,
        config.failure_ttl,
        config.max_per_window,
        config.window
    );

    // One cache and one scheduler per process, shared by every caller.
    let cache = Arc::new(RwLock::new(TtlCache::new(config.success_ttl)));
    let scheduler =
        RequestScheduler::new(config.max_per_window, config.window, config.wait_margin);
    let fetcher = CachedFetcher::new(
        Arc::clone(&cache),
        scheduler,
        config.success_ttl,
        config.failure_ttl,
    );
    let upstream = Arc::new(StatsApi::from_config(&config));
    let service = TeamStatsService::new(fetcher, upstream, config.roster.clone());
    let state = AppState::new(service);
    info!("Stats service initialized");

    // Warm the cache in the background so the first page loads hit it.
    let warmup = Arc::clone(&state.service);
    tokio::spawn(async move { warmup.preload().await });

    // Start background sweep task
    let sweep_handle = spawn_sweep_task(cache, config.sweep_interval);
    info!("Background sweep task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    // Abort the sweep task so its timer is released deterministically
    sweep_handle.abort();
    warn!("Sweep task aborted");
}
