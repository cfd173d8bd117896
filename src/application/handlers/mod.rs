//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod triage;
pub mod voice;

pub use triage::{
    Attachment, AttachmentSource, HandleInboundMessageHandler, InboundMessage, RenderedReply,
    ReplyKind, ResetConversationCommand, ResetConversationHandler, TriageError,
};
pub use voice::{
    SynthesizeSpeechCommand, SynthesizeSpeechError, SynthesizeSpeechHandler,
    SynthesizeSpeechResult, TranscribeAudioCommand, TranscribeAudioError, TranscribeAudioHandler,
    TranscribeAudioResult,
};
