//! Authentication extractor.
//!
//! Resolves the caller identity from the `Authorization: Bearer` header:
//! the token is verified by the codec, then the subject is looked up in the
//! user store so the caller's current role is always authoritative (tokens
//! carry no role claim).

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::authz::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires bearer-token authentication.
///
/// Rejects with 401 when the header is missing, the token is malformed or
/// expired, or the token's subject no longer exists.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(caller): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", caller.username)
/// }
/// ```
pub struct RequireAuth(pub Caller);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_owned()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected bearer token".to_owned()))?;

        let subject = state.tokens().extract_subject(token)?;

        let user = state
            .users()
            .find_by_username(&subject)
            .await?
            .ok_or_else(|| AppError::Unauthorized("unknown token subject".to_owned()))?;

        Ok(Self(Caller::new(user.username, user.role)))
    }
}
