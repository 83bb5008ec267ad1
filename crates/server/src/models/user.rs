//! User domain types.

use chrono::{DateTime, Utc};

use rolodex_core::{Role, UserId};

/// A persisted application user (domain type).
///
/// The password hash is opaque and never serialized; this type deliberately
/// does not implement `Serialize`.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user ID.
    pub id: UserId,
    /// Unique, immutable login name.
    pub username: String,
    /// Argon2id password hash (PHC string).
    pub password_hash: String,
    /// The user's role.
    pub role: Role,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// A user about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique, immutable login name.
    pub username: String,
    /// Argon2id password hash (PHC string).
    pub password_hash: String,
    /// The user's role.
    pub role: Role,
}
