//! Triage domain module.
//!
//! Result types, the gathering/assessing decision, prompt construction and
//! extraction of structured results from model output.

mod assessment;
mod extractor;
mod followup;
mod phase;
mod prompt;

pub use assessment::{
    Assessment, ChatReply, Degraded, TriageOutcome, UrgencyLevel, DEFAULT_DISCLAIMER,
    DEGRADED_DISCLAIMER, DEGRADED_MEDICAL_ADVICE, GATHERING_FALLBACK_REPLY,
};
pub use extractor::{
    extract_json_object, first_balanced_object, ExtractionError, TriageExtractor,
    MAX_FIELD_LENGTH,
};
pub use followup::{follow_up_questions, numbered};
pub use phase::{TriagePhase, DEFAULT_ASSESSMENT_THRESHOLD};
pub use prompt::{render_history, PromptBuilder};
