//! Safety & command classification.
//!
//! Deterministic, offline checks that run before any model call: emergency
//! phrase detection, command vocabulary and quick-reply templates.

mod command;
mod emergency;
mod quick_reply;

pub use command::{Command, CommandClassifier, CommandVocabulary};
pub use emergency::{EmergencyDetector, DEFAULT_EMERGENCY_PHRASES};
pub use quick_reply::handle_quick_reply;
pub(crate) use quick_reply::{bulleted_lines, numbered_lines};
