//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{ContactStore, PgContactStore, PgUserStore, UserStore};
use crate::services::auth::TokenCodec;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the stores, the token
/// codec, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: Option<PgPool>,
    users: Arc<dyn UserStore>,
    contacts: Arc<dyn ContactStore>,
    tokens: TokenCodec,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let tokens = TokenCodec::new(&config.token_secret, config.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                users: Arc::new(PgUserStore::new(pool.clone())),
                contacts: Arc::new(PgContactStore::new(pool.clone())),
                pool: Some(pool),
                config,
                tokens,
            }),
        }
    }

    /// Create application state over explicit stores.
    ///
    /// Used by the test suite to run the full HTTP surface against the
    /// in-memory backend.
    #[must_use]
    pub fn with_stores(
        config: ServerConfig,
        users: Arc<dyn UserStore>,
        contacts: Arc<dyn ContactStore>,
    ) -> Self {
        let tokens = TokenCodec::new(&config.token_secret, config.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: None,
                users,
                contacts,
                tokens,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the database connection pool, if this state is database-backed.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get the contact store.
    #[must_use]
    pub fn contacts(&self) -> &dyn ContactStore {
        self.inner.contacts.as_ref()
    }

    /// Get the token codec.
    #[must_use]
    pub fn tokens(&self) -> &TokenCodec {
        &self.inner.tokens
    }
}
