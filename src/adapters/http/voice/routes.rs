//! Axum routes for speech endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{list_voices, synthesize, transcribe, VoiceAppState};

/// - POST /tts - Synthesize speech
/// - GET /tts/voices - Voice catalog
/// - POST /stt - Transcribe audio
pub fn voice_routes() -> Router<VoiceAppState> {
    Router::new()
        .route("/tts", post(synthesize))
        .route("/tts/voices", get(list_voices))
        .route("/stt", post(transcribe))
}

/// Speech routes nested under /api.
pub fn voice_router() -> Router<VoiceAppState> {
    Router::new().nest("/api", voice_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::speech::{MockSpeechSynthesizer, MockTranscriber, UnconfiguredSpeech};
    use crate::application::{SynthesizeSpeechHandler, TranscribeAudioHandler};
    use crate::ports::{SpeechError, SpeechSynthesizer, Transcriber};

    fn app(synth: Arc<dyn SpeechSynthesizer>, stt: Arc<dyn Transcriber>) -> Router {
        let state = VoiceAppState::new(
            Arc::new(SynthesizeSpeechHandler::new(synth)),
            Arc::new(TranscribeAudioHandler::new(stt)),
        );
        voice_router().with_state(state)
    }

    fn mock_app() -> Router {
        app(
            Arc::new(MockSpeechSynthesizer::new()),
            Arc::new(MockTranscriber::new().with_transcript("my head hurts")),
        )
    }

    fn tts(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/tts")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn tts_returns_audio_with_voice_headers() {
        let response = mock_app()
            .oneshot(tts(r#"{"text":"hola","language":"Spanish","voicePreference":"male"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-voice-used"], "es-ES_EnriqueV3Voice");
        assert_eq!(response.headers()["x-fallback"], "false");
        assert_eq!(response.headers()["x-language"], "Spanish");
        assert_eq!(response.headers()["content-type"], "audio/mp3");
    }

    #[tokio::test]
    async fn tts_rejects_blank_text() {
        let response = mock_app().oneshot(tts(r#"{"text":"  "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unconfigured_speech_is_service_unavailable() {
        let response = app(Arc::new(UnconfiguredSpeech), Arc::new(UnconfiguredSpeech))
            .oneshot(tts(r#"{"text":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn failing_english_synthesis_is_bad_gateway() {
        let synth = MockSpeechSynthesizer::new().with_error(SpeechError::Unavailable {
            status: 500,
            message: "boom".into(),
        });
        let response = app(Arc::new(synth), Arc::new(MockTranscriber::new()))
            .oneshot(tts(r#"{"text":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn voices_lists_catalog_and_formats() {
        let response = mock_app()
            .oneshot(
                Request::builder()
                    .uri("/api/tts/voices")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["formats"][0], "mp3");
        assert_eq!(json["languages"][0]["language"], "English");
    }

    #[tokio::test]
    async fn stt_transcribes_raw_body() {
        let response = mock_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/stt?language=English")
                    .header("content-type", "audio/ogg")
                    .body(Body::from(vec![1u8, 2, 3]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["transcript"], "my head hurts");
    }

    #[tokio::test]
    async fn stt_rejects_empty_body() {
        let response = mock_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/stt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
