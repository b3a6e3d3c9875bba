//! API routes

mod auth;
mod books;
mod chat;
mod health;
mod types;

use axum::Router;

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    let jwt = state.jwt.clone();

    Router::new()
        // Health check
        .merge(health::routes())
        // Auth gateway (unauthenticated)
        .merge(auth::routes())
        // Chat relay (unauthenticated)
        .merge(chat::routes())
        // Book CRUD, gated on the token cookie
        .merge(books::routes(jwt))
        .with_state(state)
}
