//! HTTP adapter for the web chat channel.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AudioPayload, ChatRequest, ChatResponse};
pub use handlers::{ChatApiError, ChatAppState};
pub use routes::{chat_router, chat_routes};
