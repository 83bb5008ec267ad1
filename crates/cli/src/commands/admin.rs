//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! rolodex-cli admin create -u root -p <password>
//! ```
//!
//! Admin accounts can read, update, and delete every contact but can never
//! create or import one; the HTTP registration endpoint only produces
//! standard users, so this command is the only way an admin comes to exist.
//!
//! # Environment Variables
//!
//! - `ROLODEX_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to the generic `DATABASE_URL`)

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use rolodex_core::Role;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid username.
    #[error("Invalid username: must not be blank")]
    InvalidUsername,

    /// Password hashing error.
    #[error("Password hashing error")]
    PasswordHash,

    /// User already exists.
    #[error("User already exists with username: {0}")]
    UserExists(String),
}

/// Create a new admin user.
///
/// # Arguments
///
/// * `username` - Admin's login name
/// * `password` - Admin's password (hashed before storage)
///
/// # Returns
///
/// The ID of the created admin user.
///
/// # Errors
///
/// Returns `AdminError` if the username is blank or taken, or if the
/// database is unreachable.
pub async fn create_user(username: &str, password: &str) -> Result<i32, AdminError> {
    dotenvy::dotenv().ok();

    if username.trim().is_empty() {
        return Err(AdminError::InvalidUsername);
    }

    let database_url = std::env::var("ROLODEX_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AdminError::MissingEnvVar("ROLODEX_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating admin user: {}", username);

    // Check if user already exists
    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM app_user WHERE username = $1")
        .bind(username)
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(AdminError::UserExists(username.to_owned()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AdminError::PasswordHash)?
        .to_string();

    // Create the user
    let user_id: i32 = sqlx::query_scalar(
        "INSERT INTO app_user (username, password_hash, role) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(username)
    .bind(&password_hash)
    .bind(Role::Admin.to_string())
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Username: {}",
        user_id,
        username
    );

    Ok(user_id)
}
