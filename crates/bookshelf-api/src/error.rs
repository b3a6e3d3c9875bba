//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Chat is not configured")]
    ChatUnavailable,

    #[error("Database error: {0}")]
    Database(#[from] bookshelf_db::DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] bookshelf_auth::AuthError),

    #[error("Chat error: {0}")]
    Chat(#[from] bookshelf_chat::ChatError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use bookshelf_auth::AuthError;
        use bookshelf_chat::ChatError;

        // Nothing internal leaks past this boundary; every error
        // becomes an HTTP status plus a short message.
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ChatUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "chat is not configured".to_string(),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database error".to_string(),
            ),
            ApiError::Auth(e) => {
                let message = match e {
                    AuthError::InvalidCredentials => "invalid credentials",
                    AuthError::MissingToken => "missing token",
                    AuthError::InvalidToken | AuthError::TokenExpired | AuthError::Jwt(_) => {
                        "invalid token"
                    }
                    AuthError::PasswordHash(_) => {
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            axum::Json(json!({"error": "internal error"})),
                        )
                            .into_response();
                    }
                };
                (StatusCode::UNAUTHORIZED, message.to_string())
            }
            ApiError::Chat(e) => {
                let message = match e {
                    ChatError::Http(_) => "failed to contact chat service",
                    ChatError::Upstream { .. } => "chat service returned an error",
                    ChatError::InvalidResponse(_) => "invalid response from chat service",
                };
                (StatusCode::BAD_GATEWAY, message.to_string())
            }
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
