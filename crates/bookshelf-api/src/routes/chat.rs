//! Chat relay route

use axum::{Json, Router, extract::State, routing::post};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{ChatRequest, ChatResponse};

/// POST /chat
///
/// Pass-through to the generative-language API: relays the message and
/// returns the first candidate's text.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let client = state.chat.as_ref().ok_or(ApiError::ChatUnavailable)?;

    debug!("Relaying chat message ({} bytes)", request.message.len());

    let response = client.generate(&request.message).await?;

    Ok(Json(ChatResponse { response }))
}

/// Create chat routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}
