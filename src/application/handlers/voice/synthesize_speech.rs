//! SynthesizeSpeech command handler.
//!
//! Selects a voice for the language and gender preference and synthesizes
//! the text. For non-English languages a failed request is retried once with
//! the default English voice and no prosody.

use futures::FutureExt;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::DEFAULT_LANGUAGE;
use crate::domain::voice::{
    fallback_voice, select_voice, AttemptCondition, AttemptPlan, AudioFormat, VoiceGender,
};
use crate::ports::{Prosody, SpeechError, SpeechSynthesizer, SynthesisRequest};

#[derive(Debug, Clone)]
pub struct SynthesizeSpeechCommand {
    pub text: String,
    pub language: String,
    pub gender: VoiceGender,
    pub format: AudioFormat,
    pub prosody: Prosody,
    pub ssml: bool,
}

impl SynthesizeSpeechCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            gender: VoiceGender::default(),
            format: AudioFormat::default(),
            prosody: Prosody::default(),
            ssml: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_prosody(mut self, prosody: Prosody) -> Self {
        self.prosody = prosody;
        self
    }

    pub fn with_ssml(mut self, ssml: bool) -> Self {
        self.ssml = ssml;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesizeSpeechError {
    #[error("text is required")]
    EmptyText,

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizeSpeechResult {
    pub audio: Vec<u8>,
    /// MIME type without codec parameters.
    pub content_type: String,
    pub voice_used: String,
    pub fallback: bool,
}

pub struct SynthesizeSpeechHandler {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SynthesizeSpeechHandler {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub async fn handle(
        &self,
        cmd: SynthesizeSpeechCommand,
    ) -> Result<SynthesizeSpeechResult, SynthesizeSpeechError> {
        if cmd.text.trim().is_empty() {
            return Err(SynthesizeSpeechError::EmptyText);
        }

        let voice = select_voice(&cmd.language, cmd.gender);
        let mut plan = AttemptPlan::new(
            SynthesisRequest::new(cmd.text.clone(), voice, cmd.format)
                .with_prosody(cmd.prosody)
                .with_ssml(cmd.ssml),
        );
        if cmd.language != DEFAULT_LANGUAGE {
            plan = plan.then(
                SynthesisRequest::new(cmd.text, fallback_voice(), cmd.format),
                AttemptCondition::OnAnyError,
            );
        }

        let synthesizer = &self.synthesizer;
        let attempted = plan
            .run(|request| synthesizer.synthesize(request.clone()).boxed())
            .await?;

        if attempted.used_fallback() {
            tracing::info!(language = %cmd.language, "Synthesized with fallback voice");
        }

        Ok(SynthesizeSpeechResult {
            content_type: cmd.format.content_type().to_string(),
            voice_used: attempted.attempt.voice_id.clone(),
            fallback: attempted.used_fallback(),
            audio: attempted.value.bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::speech::MockSpeechSynthesizer;

    fn unavailable() -> SpeechError {
        SpeechError::Unavailable {
            status: 404,
            message: "voice not found".into(),
        }
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let mock = MockSpeechSynthesizer::new();
        let handler = SynthesizeSpeechHandler::new(Arc::new(mock.clone()));

        let result = handler.handle(SynthesizeSpeechCommand::new("   ")).await;

        assert_eq!(result, Err(SynthesizeSpeechError::EmptyText));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn selects_voice_by_language_and_gender() {
        let mock = MockSpeechSynthesizer::new();
        let handler = SynthesizeSpeechHandler::new(Arc::new(mock.clone()));

        let result = handler
            .handle(
                SynthesizeSpeechCommand::new("Hola")
                    .with_language("Spanish")
                    .with_gender(VoiceGender::Male),
            )
            .await
            .unwrap();

        assert_eq!(result.voice_used, "es-ES_EnriqueV3Voice");
        assert!(!result.fallback);
        assert_eq!(result.content_type, "audio/mp3");
    }

    #[tokio::test]
    async fn non_english_failure_falls_back_to_plain_english_voice() {
        let mock = MockSpeechSynthesizer::new().with_error(unavailable());
        let handler = SynthesizeSpeechHandler::new(Arc::new(mock.clone()));

        let result = handler
            .handle(
                SynthesizeSpeechCommand::new("Bonjour")
                    .with_language("French")
                    .with_prosody(Prosody { pitch: 10, rate: 0 }),
            )
            .await
            .unwrap();

        assert!(result.fallback);
        assert_eq!(result.voice_used, fallback_voice());
        let calls = mock.get_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].prosody.is_neutral());
        assert!(!calls[1].wants_ssml());
    }

    #[tokio::test]
    async fn english_failure_is_returned() {
        let mock = MockSpeechSynthesizer::new().with_error(unavailable());
        let handler = SynthesizeSpeechHandler::new(Arc::new(mock.clone()));

        let result = handler.handle(SynthesizeSpeechCommand::new("Hello")).await;

        assert!(matches!(result, Err(SynthesizeSpeechError::Speech(_))));
        assert_eq!(mock.call_count(), 1);
    }
}
