//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("missing token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Every token verification failure surfaces as "invalid token";
        // only the absent cookie gets its own message.
        let (status, message) = match &self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "missing token"),
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::Jwt(_) => {
                (StatusCode::UNAUTHORIZED, "invalid token")
            }
            AuthError::PasswordHash(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
