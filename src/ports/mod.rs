//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `TextGenerator` - Language-model text generation
//! - `NluAnalyzer` - Keywords, entities, sentiment and categories
//! - `Transcriber` / `SpeechSynthesizer` - Speech-to-text and text-to-speech
//! - `MediaFetcher` - Downloads attachments referenced by URL
//!
//! ## State Ports
//!
//! - `ConversationStore` - TTL-expiring per-id conversation memory
//! - `Clock` - Injectable time source

mod clock;
mod conversation_store;
mod media_fetcher;
mod nlu_analyzer;
mod speech;
mod text_generator;

pub use clock::Clock;
pub use conversation_store::ConversationStore;
pub use media_fetcher::{MediaError, MediaFetcher};
pub use nlu_analyzer::{NluAnalysis, NluAnalyzer, NluError};
pub use speech::{
    Prosody, SpeechError, SpeechSynthesizer, SynthesisRequest, SynthesizedAudio, Transcriber,
    Transcription, TranscriptionRequest,
};
pub use text_generator::{GenerationError, GenerationParams, ProviderInfo, TextGenerator};
