//! Bookshelf REST API
//!
//! This crate provides the Axum-based HTTP API for Bookshelf: the
//! auth gateway (register/login/logout), the token-gated book CRUD
//! routes, and the chat relay.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
