//! TranscribeAudio command handler.
//!
//! Runs speech-to-text with the per-language model, retrying once on the
//! telephony model when the service rejects the language model.

use futures::FutureExt;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::DEFAULT_LANGUAGE;
use crate::domain::voice::{stt_model, AttemptCondition, AttemptPlan, TELEPHONY_FALLBACK_MODEL};
use crate::ports::{SpeechError, Transcriber, Transcription, TranscriptionRequest};

/// Error markers that mean the model itself was rejected.
const MODEL_REJECTED_MARKERS: &[&str] = &["not supported", "model"];

#[derive(Debug, Clone)]
pub struct TranscribeAudioCommand {
    pub audio: Vec<u8>,
    pub content_type: String,
    /// Display language; `None` means English.
    pub language: Option<String>,
}

impl TranscribeAudioCommand {
    pub fn new(audio: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            audio,
            content_type: content_type.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscribeAudioError {
    #[error("no audio data received")]
    EmptyAudio,

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeAudioResult {
    pub transcription: Transcription,
    pub model: String,
    pub used_fallback: bool,
}

/// One entry of the transcription plan: model plus the language it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SttAttempt {
    model: &'static str,
    language: String,
}

pub struct TranscribeAudioHandler {
    transcriber: Arc<dyn Transcriber>,
}

impl TranscribeAudioHandler {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self { transcriber }
    }

    pub async fn handle(
        &self,
        cmd: TranscribeAudioCommand,
    ) -> Result<TranscribeAudioResult, TranscribeAudioError> {
        if cmd.audio.is_empty() {
            return Err(TranscribeAudioError::EmptyAudio);
        }

        let language = cmd.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let plan = AttemptPlan::new(SttAttempt {
            model: stt_model(&language),
            language: language.clone(),
        })
        .then(
            SttAttempt {
                model: TELEPHONY_FALLBACK_MODEL,
                language: DEFAULT_LANGUAGE.to_string(),
            },
            AttemptCondition::OnErrorMentioning(MODEL_REJECTED_MARKERS),
        );

        let audio = cmd.audio;
        let content_type = cmd.content_type;
        let transcriber = &self.transcriber;

        let attempted = plan
            .run(|attempt| {
                let request = TranscriptionRequest {
                    audio: audio.clone(),
                    content_type: content_type.clone(),
                    language_hint: Some(attempt.language.clone()),
                    model: attempt.model.to_string(),
                };
                transcriber.transcribe(request).boxed()
            })
            .await?;

        tracing::debug!(
            model = attempted.attempt.model,
            confidence = attempted.value.confidence,
            "Audio transcribed"
        );

        Ok(TranscribeAudioResult {
            model: attempted.attempt.model.to_string(),
            used_fallback: attempted.used_fallback(),
            transcription: attempted.value,
        })
    }
}
