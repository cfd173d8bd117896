//! Mock speech collaborators for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{
    SpeechError, SpeechSynthesizer, SynthesisRequest, SynthesizedAudio, Transcriber,
    Transcription, TranscriptionRequest,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns queued transcriptions (or errors) in order, then empty transcripts.
#[derive(Debug, Clone, Default)]
pub struct MockTranscriber {
    responses: Arc<Mutex<VecDeque<Result<Transcription, SpeechError>>>>,
    calls: Arc<Mutex<Vec<TranscriptionRequest>>>,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(self, transcript: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(Transcription {
            transcript: transcript.into(),
            detected_language: "English".to_string(),
            confidence: 90,
        }));
        self
    }

    pub fn with_error(self, error: SpeechError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Models requested, in call order.
    pub fn models(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.model.clone()).collect()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription, SpeechError> {
        lock(&self.calls).push(request);
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Ok(Transcription {
                transcript: String::new(),
                detected_language: "English".to_string(),
                confidence: 0,
            })
        })
    }
}

/// Echoes the voice id as audio bytes unless an error is queued.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechSynthesizer {
    errors: Arc<Mutex<VecDeque<SpeechError>>>,
    calls: Arc<Mutex<Vec<SynthesisRequest>>>,
}

impl MockSpeechSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(self, error: SpeechError) -> Self {
        lock(&self.errors).push_back(error);
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<SynthesisRequest> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, SpeechError> {
        let voice = request.voice_id.clone();
        let content_type = request.format.content_type().to_string();
        lock(&self.calls).push(request);

        if let Some(error) = lock(&self.errors).pop_front() {
            return Err(error);
        }

        Ok(SynthesizedAudio {
            bytes: voice.into_bytes(),
            content_type,
        })
    }
}
