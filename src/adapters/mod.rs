//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - watsonx.ai text generation (IAM auth, failover, mock)
//! - `nlu` - Watson Natural Language Understanding
//! - `speech` - Watson speech-to-text and text-to-speech
//! - `media` - Twilio media downloads
//! - `storage` - in-memory conversation store
//! - `clock` - system and manual clocks
//! - `http` - axum routers for the web chat, WhatsApp and speech endpoints

pub mod ai;
pub mod clock;
pub mod http;
pub mod media;
pub mod nlu;
pub mod speech;
pub mod storage;

pub use clock::{ManualClock, SystemClock};
pub use storage::InMemoryConversationStore;
