//! Speech Ports - transcription and synthesis collaborators.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::voice::AudioFormat;

/// Port for speech-to-text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes audio. An empty transcript is a valid result meaning the
    /// audio was unclear.
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription, SpeechError>;
}

/// Port for text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, SpeechError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub audio: Vec<u8>,
    pub content_type: String,
    /// Display language the caller expects, if known.
    pub language_hint: Option<String>,
    /// Recognition model chosen by the fallback plan.
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    pub transcript: String,
    pub detected_language: String,
    /// Highest alternative confidence as a whole percentage.
    pub confidence: u8,
}

impl Transcription {
    pub fn is_unclear(&self) -> bool {
        self.transcript.trim().is_empty()
    }
}

/// Relative pitch and rate adjustments, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prosody {
    pub pitch: i32,
    pub rate: i32,
}

impl Prosody {
    pub fn is_neutral(&self) -> bool {
        self.pitch == 0 && self.rate == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub format: AudioFormat,
    pub prosody: Prosody,
    /// Send SSML even when prosody is neutral.
    pub ssml: bool,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>, format: AudioFormat) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            format,
            prosody: Prosody::default(),
            ssml: false,
        }
    }

    pub fn with_prosody(mut self, prosody: Prosody) -> Self {
        self.prosody = prosody;
        self
    }

    pub fn with_ssml(mut self, ssml: bool) -> Self {
        self.ssml = ssml;
        self
    }

    pub fn wants_ssml(&self) -> bool {
        self.ssml || !self.prosody.is_neutral()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech service not configured")]
    NotConfigured,

    #[error("speech service returned {status}: {message}")]
    Unavailable { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}
