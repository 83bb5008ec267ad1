//! Authentication route handlers.
//!
//! Registration, login, and the caller-identity echo endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::authz::Caller;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new standard user.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<StatusCode> {
    let auth = AuthService::new(state.users(), state.tokens());
    auth.register(&req.username, &req.password).await?;

    tracing::info!(username = %req.username, "user registered");
    Ok(StatusCode::OK)
}

/// Login with username and password, returning a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.users(), state.tokens());
    let token = auth.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse { token }))
}

/// Echo the resolved caller identity.
pub async fn me(RequireAuth(caller): RequireAuth) -> Json<Caller> {
    Json(caller)
}
