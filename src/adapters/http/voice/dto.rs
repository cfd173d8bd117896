//! Request and response DTOs for the speech endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::DEFAULT_LANGUAGE;
use crate::domain::voice::{AudioFormat, LanguageVoices, VoiceGender, VOICE_CATALOG};

/// Body of `POST /api/tts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub voice_preference: VoiceGender,
    #[serde(default)]
    pub audio_format: AudioFormat,
    /// Relative pitch in percent.
    #[serde(default)]
    pub pitch: i32,
    /// Relative rate in percent.
    #[serde(default)]
    pub rate: i32,
    #[serde(default, rename = "useSSML")]
    pub use_ssml: bool,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Query of `POST /api/stt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SttQuery {
    pub language: Option<String>,
}

/// Response of `GET /api/tts/voices`.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceCatalogResponse {
    pub languages: Vec<LanguageVoices>,
    pub formats: Vec<&'static str>,
}

impl VoiceCatalogResponse {
    pub fn current() -> Self {
        Self {
            languages: (*VOICE_CATALOG).clone(),
            formats: AudioFormat::ALL.iter().map(AudioFormat::name).collect(),
        }
    }
}
