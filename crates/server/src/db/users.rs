//! User store: the persistence contract for user records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use rolodex_core::{Role, UserId};

use super::StoreError;
use crate::models::{NewUser, UserRecord};

/// Persistence contract for user records.
///
/// Stores own no policy; uniqueness of the username is the only invariant
/// enforced here.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new user, assigning its id.
    ///
    /// Returns `StoreError::Conflict` if the username is already taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

// =============================================================================
// PostgreSQL implementation
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| StoreError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

/// `PostgreSQL`-backed user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, role, created_at \
             FROM app_user WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO app_user (username, password_hash, role) \
             VALUES ($1, $2, $3) \
             RETURNING id, username, password_hash, role, created_at",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict("username already exists".to_owned());
            }
            StoreError::Database(e)
        })?;

        row.try_into()
    }
}
