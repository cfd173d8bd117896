//! Axum routes for the WhatsApp webhook.

use axum::routing::post;
use axum::Router;

use super::handlers::{receive_whatsapp_message, WhatsAppAppState};

/// - POST /whatsapp - Twilio inbound message webhook
pub fn whatsapp_routes() -> Router<WhatsAppAppState> {
    Router::new().route("/whatsapp", post(receive_whatsapp_message))
}

/// WhatsApp routes nested under /api.
pub fn whatsapp_router() -> Router<WhatsAppAppState> {
    Router::new().nest("/api", whatsapp_routes())
}
