//! Voice support: voice/model catalog and ordered fallback plans.

mod catalog;
mod fallback;

pub use catalog::{
    fallback_voice, select_voice, stt_model, AudioFormat, LanguageVoices, Voice, VoiceGender,
    TELEPHONY_FALLBACK_MODEL, VOICE_CATALOG,
};
pub use fallback::{AttemptCondition, AttemptPlan, Attempted};
