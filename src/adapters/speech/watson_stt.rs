//! Watson Speech-to-Text - Implementation of Transcriber.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::config::{check_status, WatsonSpeechConfig};
use crate::domain::conversation::{detect_script_language, DEFAULT_LANGUAGE};
use crate::ports::{SpeechError, Transcriber, Transcription, TranscriptionRequest};

pub struct WatsonSttTranscriber {
    config: WatsonSpeechConfig,
    client: Client,
}

impl WatsonSttTranscriber {
    pub fn new(config: WatsonSpeechConfig) -> Self {
        let client = config.client();
        Self { config, client }
    }
}

#[async_trait]
impl Transcriber for WatsonSttTranscriber {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription, SpeechError> {
        tracing::debug!(model = %request.model, bytes = request.audio.len(), "Transcribing audio");

        let response = self
            .client
            .post(self.config.endpoint("/v1/recognize"))
            .query(&[
                ("model", request.model.as_str()),
                ("smart_formatting", "true"),
            ])
            .basic_auth("apikey", Some(self.config.api_key()))
            .header("Content-Type", request.content_type.as_str())
            .body(request.audio)
            .send()
            .await
            .map_err(|e| self.config.map_send_error(e))?;

        let body: RecognizeResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| SpeechError::Parse(e.to_string()))?;

        let fallback_language = request.language_hint.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        Ok(to_transcription(body, fallback_language))
    }
}

fn to_transcription(body: RecognizeResponse, fallback_language: &str) -> Transcription {
    let mut parts = Vec::new();
    let mut confidence: f64 = 0.0;

    for result in body.results.iter().filter(|r| r.is_final) {
        if let Some(alternative) = result.alternatives.first() {
            parts.push(alternative.transcript.trim());
            confidence = confidence.max(alternative.confidence.unwrap_or(0.0));
        }
    }

    let transcript = parts.join(" ").trim().to_string();
    let detected_language = detect_script_language(&transcript, fallback_language).to_string();

    Transcription {
        transcript,
        detected_language,
        confidence: (confidence * 100.0).round().clamp(0.0, 100.0) as u8,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Watson STT API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(rename = "final", default)]
    is_final: bool,
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
    confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RecognizeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joins_final_results_and_takes_max_confidence() {
        let body = parse(
            r#"{"results":[
                {"final":true,"alternatives":[{"transcript":"i have a headache ","confidence":0.81}]},
                {"final":false,"alternatives":[{"transcript":"ignored"}]},
                {"final":true,"alternatives":[{"transcript":"since monday","confidence":0.93}]}
            ]}"#,
        );

        let t = to_transcription(body, "English");

        assert_eq!(t.transcript, "i have a headache since monday");
        assert_eq!(t.confidence, 93);
        assert_eq!(t.detected_language, "English");
    }

    #[test]
    fn empty_results_give_unclear_transcript() {
        let t = to_transcription(parse(r#"{"results":[]}"#), "English");
        assert!(t.is_unclear());
        assert_eq!(t.confidence, 0);
    }

    #[test]
    fn script_detection_overrides_hint() {
        let body = parse(
            r#"{"results":[{"final":true,"alternatives":[{"transcript":"मुझे बुखार है","confidence":0.7}]}]}"#,
        );
        let t = to_transcription(body, "English");
        assert_eq!(t.detected_language, "Hindi");
    }
}
