//! Application state

use bookshelf_auth::JwtManager;
use bookshelf_chat::ChatClient;
use bookshelf_db::Database;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Everything here is read-only after startup; concurrent requests
/// share the pooled database connection and the signing keys.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    /// Absent when no API key is configured; the chat route then
    /// responds 503 instead of the process failing at startup.
    pub chat: Option<Arc<ChatClient>>,
}

impl AppState {
    pub fn new(db: Database, jwt: Arc<JwtManager>, chat: Option<Arc<ChatClient>>) -> Self {
        Self { db, jwt, chat }
    }
}
