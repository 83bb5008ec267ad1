//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (probes the database)
//!
//! # Auth
//! POST /auth/register           - Register a standard user
//! POST /auth/login              - Login, returns a bearer token
//! GET  /auth/me                 - Echo the resolved caller identity
//!
//! # Contacts (bearer token required)
//! GET    /api/contacts          - List visible contacts
//! POST   /api/contacts          - Create a contact (admins: 403)
//! GET    /api/contacts/{id}     - Fetch one contact
//! PUT    /api/contacts/{id}     - Overwrite a contact's fields
//! DELETE /api/contacts/{id}     - Delete a contact
//! GET    /api/contacts/export   - Export visible contacts (portable shape)
//! POST   /api/contacts/import   - Atomically replace the caller's set
//! ```

pub mod auth;
pub mod contacts;
pub mod transfer;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Create the contacts API router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contacts", get(contacts::list).post(contacts::create))
        .route("/api/contacts/export", get(transfer::export))
        .route("/api/contacts/import", post(transfer::import))
        .route(
            "/api/contacts/{id}",
            get(contacts::get_one)
                .put(contacts::update_one)
                .delete(contacts::delete_one),
        )
}

/// Create the combined application router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(contact_routes())
}
