//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db::OfferRepository;
use crate::semantic::SemanticClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the semantic lookup client.
/// Everything here is constructed once at process start and injected,
/// never reached through ambient globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    offers: OfferRepository,
    semantic: SemanticClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the semantic lookup client cannot be
    /// built from the configuration.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, reqwest::Error> {
        let offers = OfferRepository::new(pool.clone());
        let semantic = SemanticClient::new(&config.semantic)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                offers,
                semantic,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the offer repository.
    #[must_use]
    pub fn offers(&self) -> &OfferRepository {
        &self.inner.offers
    }

    /// Get a reference to the semantic lookup client.
    #[must_use]
    pub fn semantic(&self) -> &SemanticClient {
        &self.inner.semantic
    }
}
