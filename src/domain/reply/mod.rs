//! Response formatting.
//!
//! Fixed messages, channel templates for assessments and commands, and
//! speech-ready text.

mod formatter;
pub mod messages;
mod speech;
mod urgency;

pub use formatter::{
    format_assessment, format_chat_reply, format_more_details, format_quick_reply,
    format_remedies, Channel,
};
pub use speech::{strip_markup, tts_text, Speakable};
pub use urgency::{urgency_action, urgency_emoji, urgency_indicator};
