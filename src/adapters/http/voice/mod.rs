//! HTTP adapter for text-to-speech and speech-to-text.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{SttQuery, TtsRequest, VoiceCatalogResponse};
pub use handlers::{VoiceApiError, VoiceAppState};
pub use routes::{voice_router, voice_routes};
