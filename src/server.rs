//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, cache and health tracker setup, the
//! AI provider, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::ai::{OpenAiClient, TextGenerator, UnconfiguredGenerator};
use crate::infrastructure::cache::{
    CacheService, CachedValue, MemoryCache, NullCache, ReadThroughCache,
};
use crate::infrastructure::health::{HealthTracker, PgHealthProbe};
use crate::routes::app_router;
use crate::state::{AppState, Repositories};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Read-through cache (memory, or pass-through when disabled)
/// - Connection health monitor
/// - AI provider (or a stand-in when no key is configured)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);

    let backend: Arc<dyn CacheService> = if config.cache_enabled {
        tracing::info!("Cache enabled (memory)");
        Arc::new(MemoryCache::<CachedValue>::new())
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };
    let cache = Arc::new(
        ReadThroughCache::new(backend, config.cache_default_ttl())
            .with_single_flight(config.cache_single_flight),
    );

    let health = Arc::new(HealthTracker::new(
        Arc::new(PgHealthProbe::new(pool.clone())),
        config.health_check_interval(),
        config.health_check_timeout(),
    ));
    health.clone().spawn_monitor();
    tracing::info!("Health monitor started");

    let generator: Arc<dyn TextGenerator> = match &config.ai_api_key {
        Some(key) => Arc::new(
            OpenAiClient::new(
                &config.ai_api_url,
                key.clone(),
                config.ai_model.clone(),
                config.ai_timeout(),
            )
            .context("Failed to initialize AI client")?,
        ),
        None => {
            tracing::warn!("AI_API_KEY not set; AI endpoints will answer 503");
            Arc::new(UnconfiguredGenerator)
        }
    };

    let state = AppState::new(
        Repositories::postgres(pool),
        cache,
        health,
        generator,
        config.token_signing_secret.clone(),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
