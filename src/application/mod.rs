//! Application layer - use cases over the domain and ports.
//!
//! - `AssessmentEngine` - phase decision, prompt, generation and extraction
//! - `IntentClassifier` - NLU call folded into an intent and annotation
//! - `handlers` - the inbound-message orchestrator, reset, and voice use cases

mod assessment_engine;
pub mod handlers;
mod intent_classifier;

pub use assessment_engine::{AssessmentEngine, EngineConfig, EngineError, DEFAULT_HISTORY_WINDOW};
pub use handlers::{
    Attachment, AttachmentSource, HandleInboundMessageHandler, InboundMessage, RenderedReply,
    ReplyKind, ResetConversationCommand, ResetConversationHandler, SynthesizeSpeechCommand,
    SynthesizeSpeechError, SynthesizeSpeechHandler, SynthesizeSpeechResult,
    TranscribeAudioCommand, TranscribeAudioError, TranscribeAudioHandler, TranscribeAudioResult,
    TriageError,
};
pub use intent_classifier::{Classification, IntentClassifier};
