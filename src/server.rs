//! HTTP server initialization and runtime setup.
//!
//! Handles storage connections, cache setup, generator loading, and the Axum
//! server lifecycle.

use crate::application::services::{LinkService, SequenceGenerator};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{GeneratorStateRepository, UrlRepository};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    InMemoryStore, PgGeneratorStateRepository, PgUrlRepository,
};
use crate::routes::{RESERVED_CODES, app_router};
use crate::state::AppState;
use crate::utils::alphabet::Alphabet;
use crate::utils::sanitizer::UrlSanitizer;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Both repository handles backed by the configured store.
pub struct Storage {
    pub urls: Arc<dyn UrlRepository>,
    pub generator_state: Arc<dyn GeneratorStateRepository>,
    pub backend: &'static str,
}

/// Connects to PostgreSQL with exponential backoff and applies migrations.
///
/// # Errors
///
/// Returns an error if every connection attempt fails or a migration fails.
pub async fn connect_pool(database_url: &str, config: &Config) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(200)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    let pool = Retry::spawn(strategy, move || async move {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(database_url)
            .await
            .inspect_err(|e| tracing::warn!("Database connection attempt failed: {}", e))
    })
    .await
    .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(pool)
}

/// Opens the store selected by `STORAGE_BACKEND`.
///
/// # Errors
///
/// Returns an error if the PostgreSQL store cannot be reached.
pub async fn open_storage(config: &Config) -> Result<Storage> {
    match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = Arc::new(connect_pool(database_url, config).await?);
            Ok(Storage {
                urls: Arc::new(PgUrlRepository::new(pool.clone())),
                generator_state: Arc::new(PgGeneratorStateRepository::new(pool)),
                backend: "postgres",
            })
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required for the postgres storage backend")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; links will not survive a restart");
            let store = Arc::new(InMemoryStore::new());
            Ok(Storage {
                urls: store.clone(),
                generator_state: store,
                backend: "memory",
            })
        }
    }
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Sequence generator from persisted state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Storage connection fails
/// - Generator state cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = open_storage(&config).await?;
    let cache = connect_cache(&config).await;

    let generator = SequenceGenerator::load(Alphabet::default(), storage.generator_state)
        .await
        .context("Failed to load generator state")?
        .with_reserved(RESERVED_CODES);
    tracing::info!("Next short code: {}", generator.peek().await);

    let link_service = Arc::new(LinkService::new(
        storage.urls,
        Arc::new(generator),
        UrlSanitizer::with_max_length(config.max_url_length),
    ));

    let state = AppState::new(link_service, cache, storage.backend)
        .with_public_base_url(config.public_base_url.clone());

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
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
