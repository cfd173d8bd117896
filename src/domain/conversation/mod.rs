//! Conversation domain module.
//!
//! Messages, NLU annotations, the bounded per-user `Conversation` aggregate
//! and display-language detection.

mod conversation;
mod language;
mod message;

pub use conversation::{Conversation, DEFAULT_MAX_MESSAGES};
pub use language::{detect_language, detect_script_language, DEFAULT_LANGUAGE};
pub use message::{Entity, Message, NluAnnotation, Role, Sentiment};
