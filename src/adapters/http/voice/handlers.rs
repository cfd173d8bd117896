//! HTTP handlers for text-to-speech and speech-to-text.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::ErrorResponse;
use crate::application::{
    SynthesizeSpeechCommand, SynthesizeSpeechError, SynthesizeSpeechHandler,
    TranscribeAudioCommand, TranscribeAudioError, TranscribeAudioHandler,
};
use crate::ports::{Prosody, SpeechError};

use super::dto::{SttQuery, TtsRequest, VoiceCatalogResponse};

const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/webm";

#[derive(Clone)]
pub struct VoiceAppState {
    pub synthesize: Arc<SynthesizeSpeechHandler>,
    pub transcribe: Arc<TranscribeAudioHandler>,
}

impl VoiceAppState {
    pub fn new(
        synthesize: Arc<SynthesizeSpeechHandler>,
        transcribe: Arc<TranscribeAudioHandler>,
    ) -> Self {
        Self {
            synthesize,
            transcribe,
        }
    }
}

/// POST /api/tts - Synthesize speech.
///
/// Returns the audio bytes with `X-Voice-Used`, `X-Fallback` and
/// `X-Language` headers.
pub async fn synthesize(
    State(state): State<VoiceAppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Response, VoiceApiError> {
    let language = request.language.clone();
    let cmd = SynthesizeSpeechCommand::new(request.text)
        .with_language(request.language)
        .with_gender(request.voice_preference)
        .with_format(request.audio_format)
        .with_prosody(Prosody {
            pitch: request.pitch,
            rate: request.rate,
        })
        .with_ssml(request.use_ssml);

    let result = state.synthesize.handle(cmd).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, header_value(&result.content_type));
    headers.insert("x-voice-used", header_value(&result.voice_used));
    headers.insert(
        "x-fallback",
        HeaderValue::from_static(if result.fallback { "true" } else { "false" }),
    );
    headers.insert("x-language", header_value(&language));

    Ok((StatusCode::OK, headers, result.audio).into_response())
}

/// GET /api/tts/voices - Voice catalog and supported formats.
pub async fn list_voices() -> impl IntoResponse {
    Json(VoiceCatalogResponse::current())
}

/// POST /api/stt?language= - Transcribe a raw audio body.
pub async fn transcribe(
    State(state): State<VoiceAppState>,
    Query(query): Query<SttQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, VoiceApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE);

    let mut cmd = TranscribeAudioCommand::new(body.to_vec(), content_type);
    if let Some(language) = query.language.filter(|l| !l.trim().is_empty()) {
        cmd = cmd.with_language(language);
    }

    let result = state.transcribe.handle(cmd).await?;
    Ok(Json(result.transcription))
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum VoiceApiError {
    #[error("text is required")]
    EmptyText,

    #[error("no audio data received")]
    EmptyAudio,

    #[error(transparent)]
    Speech(SpeechError),
}

impl From<SynthesizeSpeechError> for VoiceApiError {
    fn from(err: SynthesizeSpeechError) -> Self {
        match err {
            SynthesizeSpeechError::EmptyText => VoiceApiError::EmptyText,
            SynthesizeSpeechError::Speech(e) => VoiceApiError::Speech(e),
        }
    }
}

impl From<TranscribeAudioError> for VoiceApiError {
    fn from(err: TranscribeAudioError) -> Self {
        match err {
            TranscribeAudioError::EmptyAudio => VoiceApiError::EmptyAudio,
            TranscribeAudioError::Speech(e) => VoiceApiError::Speech(e),
        }
    }
}

impl IntoResponse for VoiceApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            VoiceApiError::EmptyText => (StatusCode::BAD_REQUEST, "EMPTY_TEXT"),
            VoiceApiError::EmptyAudio => (StatusCode::BAD_REQUEST, "EMPTY_AUDIO"),
            VoiceApiError::Speech(SpeechError::NotConfigured) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SPEECH_NOT_CONFIGURED")
            }
            VoiceApiError::Speech(e) => {
                tracing::warn!(error = %e, "speech collaborator failed");
                (StatusCode::BAD_GATEWAY, "SPEECH_UNAVAILABLE")
            }
        };
        (status, Json(ErrorResponse::new(code, self.to_string()))).into_response()
    }
}
