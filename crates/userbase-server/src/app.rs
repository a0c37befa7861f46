//! Application builder.

use anyhow::Context;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tracing::info;
use userbase_config::{AppConfig, StoreBackend, StoreConfig};
use userbase_core::UserbaseResult;
use userbase_repository::{InMemoryRecordStore, RecordStore, RedisRecordStore};
use userbase_rest::{create_router, AppState};
use userbase_service::{UserService, UserServiceImpl};

/// Creates the record store selected by configuration.
///
/// The Redis backend is checked with a `PING` before it is returned.
pub async fn build_store(config: &StoreConfig) -> UserbaseResult<Arc<dyn RecordStore>> {
    info!("Initializing {} record store", config.backend);

    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryRecordStore::new()),
        StoreBackend::Redis => Arc::new(RedisRecordStore::connect(config).await?),
    };

    Ok(store)
}

/// Application builder for constructing the server.
#[derive(Debug, Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the router with every dependency injected.
    pub async fn build(self) -> UserbaseResult<Router> {
        let config = self.config.unwrap_or_default();

        let store = build_store(&config.store).await?;
        let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(store));

        Ok(create_router(AppState::new(
            user_service,
            config.store.backend.to_string(),
        )))
    }
}

/// Builds the application and serves it on `server.addr()` until
/// `shutdown` resolves.
pub async fn serve(
    config: AppConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = config.server.addr();

    let router = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    Ok(())
}
