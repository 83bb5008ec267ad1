//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//!
//! The mapping deliberately never leaks internals: store and hashing
//! failures collapse to a generic 500 body, and the two login failure
//! causes share one status and one body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::services::auth::{AuthError, TokenError};
use crate::services::directory::DirError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bearer token verification failed.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Directory operation failed.
    #[error("Directory error: {0}")]
    Directory(#[from] DirError),

    /// Store operation failed outside a service.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The request carries no usable identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::UsernameTaken => StatusCode::CONFLICT,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::PasswordHash | AuthError::Token(_) | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Token(_) | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Directory(err) => match err {
                DirError::NotFound => StatusCode::NOT_FOUND,
                DirError::Forbidden => StatusCode::FORBIDDEN,
                DirError::Invalid(_) => StatusCode::BAD_REQUEST,
                DirError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        match self {
            Self::Directory(DirError::Invalid(violations)) => {
                (status, Json(json!({ "violations": violations }))).into_response()
            }
            Self::Auth(AuthError::UsernameTaken) => {
                (status, "username already exists").into_response()
            }
            Self::Auth(AuthError::InvalidCredentials) => {
                (status, "invalid credentials").into_response()
            }
            Self::Token(_) | Self::Unauthorized(_) => {
                (status, "invalid or missing credentials").into_response()
            }
            Self::Directory(DirError::NotFound) => (status, "contact not found").into_response(),
            Self::Directory(DirError::Forbidden) => (status, "forbidden").into_response(),
            _ => (status, "Internal server error").into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::directory::Violation;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::UsernameTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        assert_eq!(
            get_status(AppError::Token(TokenError::Malformed)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Token(TokenError::Expired)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Unauthorized("no header".to_owned())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_directory_error_status_codes() {
        assert_eq!(
            get_status(AppError::Directory(DirError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Directory(DirError::Forbidden)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Directory(DirError::Invalid(vec![
                Violation::new("phone", "must be exactly 9 digits")
            ]))),
            StatusCode::BAD_REQUEST
        );
    }
}
