//! Authentication error types.

use thiserror::Error;

use crate::db::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with a username that is already taken.
    #[error("username already exists")]
    UsernameTaken,

    /// Invalid credentials (wrong password or unknown user).
    ///
    /// Deliberately a single variant: the two causes must stay
    /// indistinguishable to callers so usernames cannot be enumerated.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Token issuing failed.
    #[error("token error: {0}")]
    Token(#[from] crate::services::auth::TokenError),

    /// Store/database error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
