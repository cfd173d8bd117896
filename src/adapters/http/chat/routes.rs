//! Axum routes for the web chat endpoints.

use axum::routing::{delete, post};
use axum::Router;

use super::handlers::{reset_conversation, send_chat_message, ChatAppState};

/// Creates routes for chat endpoints.
///
/// - POST /chat - Send a message, receive a rendered reply
/// - DELETE /chat/:conversation_id - Reset a conversation
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(send_chat_message))
        .route("/chat/:conversation_id", delete(reset_conversation))
}

/// Chat routes nested under /api.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new().nest("/api", chat_routes())
}
