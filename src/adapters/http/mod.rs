//! HTTP adapters - REST API implementations.
//!
//! Each channel has its own HTTP adapter; `router` merges them.
//!
//! - `chat` - web chat JSON API
//! - `whatsapp` - Twilio webhook answering with TwiML
//! - `voice` - text-to-speech and speech-to-text endpoints

pub mod chat;
mod error;
mod router;
pub mod voice;
pub mod whatsapp;

pub use chat::{chat_router, ChatAppState};
pub use error::ErrorResponse;
pub use router::{create_router, health, HttpServices};
pub use voice::{voice_router, VoiceAppState};
pub use whatsapp::{whatsapp_router, WhatsAppAppState};
