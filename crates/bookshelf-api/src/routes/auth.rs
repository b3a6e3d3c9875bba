//! Auth gateway routes: register, login, logout

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
};
use bookshelf_auth::{AuthError, TOKEN_COOKIE, hash_password, verify_password};
use bookshelf_db::NewUser;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{CredentialsRequest, MessageResponse};

// ==================== Input Validation ====================

/// Maximum allowed username length
const MAX_USERNAME_LENGTH: usize = 64;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;

/// Validate username and password lengths
fn validate_credentials(request: &CredentialsRequest) -> Result<(), ApiError> {
    if request.username.is_empty() {
        return Err(ApiError::BadRequest("username cannot be empty".to_string()));
    }
    if request.username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if request.password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

// ==================== Auth Routes ====================

/// POST /register
///
/// Inserts unconditionally: no uniqueness check, a repeated username
/// simply registers again.
async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validate_credentials(&request)?;

    debug!("Registering user: {}", request.username);

    let password_hash = hash_password(&request.password)?;

    let user = state
        .db
        .insert_user(NewUser {
            username: request.username,
            password_hash,
        })
        .await?;

    info!("Registered user: {}", user.username);

    Ok((StatusCode::CREATED, Json(MessageResponse::new("registered"))))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_credentials(&request)?;

    debug!("Login attempt for user: {}", request.username);

    // Find user - but don't return early to prevent timing attacks
    let user_result = state.db.get_user_by_username(&request.username).await?;

    // Always run verification; a dummy hash keeps the missing-user
    // path on the same argon2 timing profile
    const DUMMY_HASH: &str =
        "$argon2id$v=19$m=19456,t=2,p=1$dGltaW5nX2F0dGFja19wcmV2ZW50aW9u$K8rI5T7VdQ8xkO0GqK5K2w";

    let (hash_to_verify, user) = match user_result {
        Some(u) => (u.password_hash.clone(), Some(u)),
        None => (DUMMY_HASH.to_string(), None),
    };

    let password_valid = verify_password(&request.password, &hash_to_verify);

    let user = match (user, password_valid) {
        (Some(u), true) => u,
        _ => return Err(ApiError::Auth(AuthError::InvalidCredentials)),
    };

    let token = state.jwt.generate_token(&user.username)?;

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_COOKIE,
        token,
        state.jwt.expiry_seconds()
    );

    info!("User {} logged in", user.username);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::new("logged in")),
    ))
}

/// GET /logout
///
/// Overwrites the client cookie with an empty, immediately-expiring
/// value. Tokens are stateless, so an already-issued token stays
/// cryptographically valid until its expiry; logout only makes the
/// client drop it.
async fn logout() -> impl IntoResponse {
    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", TOKEN_COOKIE);

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::new("logged out")),
    )
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
}
