//! Book CRUD routes, reachable only through the auth middleware

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, put},
};
use bookshelf_auth::{JwtManager, require_auth};
use bookshelf_db::{BookPatch, NewBook};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{BookResponse, CreateBookRequest, MessageResponse, UpdateBookRequest};

/// POST /books
async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    debug!("Creating book: {}", request.title);

    let book = state
        .db
        .insert_book(NewBook {
            title: request.title,
            author: request.author,
        })
        .await?;

    info!("Created book {} ({})", book.id, book.title);

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// GET /books
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = state.db.list_books().await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// PUT /books/{id}
///
/// Merge-patch: only fields present in the body overwrite stored
/// values. An unmatched id acks as a no-op; the store reports the
/// miss, but this endpoint is deliberately idempotent.
async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let matched = state
        .db
        .update_book(
            id,
            BookPatch {
                title: request.title,
                author: request.author,
            },
        )
        .await?;

    if matched {
        info!("Updated book {}", id);
    } else {
        debug!("Update matched no book for id {}", id);
    }

    Ok(Json(MessageResponse::new("book updated")))
}

/// DELETE /books/{id}
///
/// Same idempotent no-op policy as update for an unmatched id.
async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let matched = state.db.delete_book(id).await?;

    if matched {
        info!("Deleted book {}", id);
    } else {
        debug!("Delete matched no book for id {}", id);
    }

    Ok(Json(MessageResponse::new("book deleted")))
}

/// Create book routes behind the token-cookie gate
pub fn routes(jwt: Arc<JwtManager>) -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
