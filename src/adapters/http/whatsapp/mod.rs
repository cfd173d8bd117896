//! HTTP adapter for the Twilio WhatsApp channel.

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod twiml;

pub use dto::WhatsAppWebhook;
pub use handlers::WhatsAppAppState;
pub use routes::{whatsapp_router, whatsapp_routes};
