use async_trait::async_trait;

use crate::ports::{
    SpeechError, SpeechSynthesizer, SynthesisRequest, SynthesizedAudio, Transcriber,
    Transcription, TranscriptionRequest,
};

/// Stand-in when speech credentials are absent; every call reports
/// `NotConfigured`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSpeech;

#[async_trait]
impl Transcriber for UnconfiguredSpeech {
    async fn transcribe(&self, _: TranscriptionRequest) -> Result<Transcription, SpeechError> {
        Err(SpeechError::NotConfigured)
    }
}

#[async_trait]
impl SpeechSynthesizer for UnconfiguredSpeech {
    async fn synthesize(&self, _: SynthesisRequest) -> Result<SynthesizedAudio, SpeechError> {
        Err(SpeechError::NotConfigured)
    }
}
