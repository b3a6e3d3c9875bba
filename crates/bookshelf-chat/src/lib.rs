//! Bookshelf Chat
//!
//! Thin client for the third-party generative-language API: sends a
//! user message to the `generateContent` endpoint and relays the first
//! candidate's text.

pub mod client;
pub mod error;

pub use client::{ChatClient, ChatClientConfig};
pub use error::ChatError;
