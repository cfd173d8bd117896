//! Triage command handlers.

mod handle_inbound_message;
mod reset_conversation;

pub use handle_inbound_message::{
    Attachment, AttachmentSource, HandleInboundMessageHandler, InboundMessage, RenderedReply,
    ReplyKind, TriageError,
};
pub use reset_conversation::{ResetConversationCommand, ResetConversationHandler};
