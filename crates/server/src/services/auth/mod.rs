//! Authentication service.
//!
//! Verifies username/password credentials against the user store and
//! issues bearer tokens.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenCodec, TokenError};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use rolodex_core::Role;

use crate::db::{StoreError, UserStore};
use crate::models::NewUser;

/// Authentication service.
///
/// Handles user registration and login. Passwords are hashed with
/// Argon2id; hashing and verification run on the blocking thread pool
/// because they are CPU-bound by design and would otherwise stall the
/// async executor under concurrent logins.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenCodec,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, tokens: &'a TokenCodec) -> Self {
        Self { users, tokens }
    }

    /// Register a new standard user.
    ///
    /// Admin accounts are never created here; they are provisioned out of
    /// band via the CLI.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UsernameTaken` if the username is already
    /// registered.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|_| AuthError::PasswordHash)??;

        self.users
            .insert(NewUser {
                username: username.to_owned(),
                password_hash,
                role: Role::Standard,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                StoreError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Store(other),
            })?;

        Ok(())
    }

    /// Login with username and password, returning a signed token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown
    /// or the password is wrong; the two cases are indistinguishable.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = password.to_owned();
        let hash = user.password_hash;
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|_| AuthError::InvalidCredentials)??;

        Ok(self.tokens.issue(&user.username)?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    use secrecy::SecretString;

    use crate::db::MemoryUserStore;

    fn test_codec() -> TokenCodec {
        let secret = SecretString::from("k9#mP2$vL8@qR5!xW3^zB7&nJ4*tG6cd");
        TokenCodec::new(&secret, Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn test_register_then_login_yields_token_for_subject() {
        let users = MemoryUserStore::new();
        let tokens = test_codec();
        let auth = AuthService::new(&users, &tokens);

        auth.register("alice", "correct horse").await.unwrap();
        let token = auth.login("alice", "correct horse").await.unwrap();

        assert_eq!(tokens.extract_subject(&token).unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_register_taken_username() {
        let users = MemoryUserStore::new();
        let tokens = test_codec();
        let auth = AuthService::new(&users, &tokens);

        auth.register("alice", "pw1").await.unwrap();
        let err = auth.register("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let users = MemoryUserStore::new();
        let tokens = test_codec();
        let auth = AuthService::new(&users, &tokens);

        auth.register("alice", "right").await.unwrap();

        let wrong_password = auth.login("alice", "wrong").await.unwrap_err();
        let unknown_user = auth.login("nobody", "whatever").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        // Same display text, so HTTP bodies cannot differ either
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_registered_users_are_standard_role() {
        let users = MemoryUserStore::new();
        let tokens = test_codec();
        let auth = AuthService::new(&users, &tokens);

        auth.register("alice", "pw").await.unwrap();
        let record = users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(record.role, Role::Standard);
        // The raw password is never stored
        assert_ne!(record.password_hash, "pw");
    }
}
