//! Persistence layer.
//!
//! The service talks to storage through the [`users::UserStore`] and
//! [`contacts::ContactStore`] traits; all policy (ownership, roles,
//! validation) lives above this layer. Two backends exist:
//!
//! - `PostgreSQL` via sqlx (production), using runtime-checked queries with
//!   row structs converted into domain types
//! - In-memory maps (test suite)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p rolodex-cli -- migrate
//! ```

pub mod contacts;
pub mod memory;
pub mod users;

pub use contacts::{ContactStore, PgContactStore};
pub use memory::{MemoryContactStore, MemoryUserStore};
pub use users::{PgUserStore, UserStore};

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
