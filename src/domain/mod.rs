//! Domain layer containing triage logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (conversation ids, timestamps, validation errors)
//! - `conversation` - Messages, NLU annotations, the bounded conversation record, language detection
//! - `safety` - Emergency allowlist, command vocabulary, quick-reply templates
//! - `intent` - Intent inference from NLU signals
//! - `triage` - Assessment types, phase decision, prompt building, JSON extraction
//! - `reply` - Channel formatting, fixed messages, speech text
//! - `voice` - Voice/model catalog and ordered fallback plans

pub mod conversation;
pub mod foundation;
pub mod intent;
pub mod reply;
pub mod safety;
pub mod triage;
pub mod voice;
