//! Cookie-token authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::jwt::JwtManager;

/// Name of the session cookie carrying the JWT
pub const TOKEN_COOKIE: &str = "token";

/// Authenticated user information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
}

/// Find a cookie value in a raw Cookie header
pub fn token_from_cookie_header<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == cookie_name {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Authentication middleware
///
/// Gates a route group on the `token` cookie: absent cookie rejects
/// with "missing token", any verification failure with "invalid
/// token". On success the AuthUser is added to request extensions and
/// the request is forwarded unchanged.
pub async fn require_auth(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| token_from_cookie_header(header, TOKEN_COOKIE))
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_manager
        .validate_token(token)
        .map_err(|_| AuthError::InvalidToken)?;

    let user = AuthUser {
        username: claims.sub,
    };

    debug!("Authenticated user: {}", user.username);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(
            token_from_cookie_header("token=abc.def.ghi", "token"),
            Some("abc.def.ghi")
        );
        assert_eq!(
            token_from_cookie_header("theme=dark; token=abc; lang=en", "token"),
            Some("abc")
        );
        assert_eq!(token_from_cookie_header("theme=dark", "token"), None);
        // A name that merely contains "token" must not match
        assert_eq!(token_from_cookie_header("csrf_token=abc", "token"), None);
    }

    #[test]
    fn test_cleared_cookie_is_empty() {
        // After logout the client may still send "token=" until it
        // drops the cookie; that must read as missing.
        assert_eq!(token_from_cookie_header("token=", "token"), Some(""));
    }
}
