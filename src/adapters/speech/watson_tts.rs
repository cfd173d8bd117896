//! Watson Text-to-Speech - Implementation of SpeechSynthesizer.
//!
//! Plain requests send `{"text": ...}` as JSON. Requests with prosody (or an
//! explicit SSML flag) send an SSML document instead.

use async_trait::async_trait;
use quick_xml::escape::escape;
use reqwest::Client;
use serde_json::json;

use super::config::{check_status, WatsonSpeechConfig};
use crate::ports::{Prosody, SpeechError, SpeechSynthesizer, SynthesisRequest, SynthesizedAudio};

pub struct WatsonTtsSynthesizer {
    config: WatsonSpeechConfig,
    client: Client,
}

impl WatsonTtsSynthesizer {
    pub fn new(config: WatsonSpeechConfig) -> Self {
        let client = config.client();
        Self { config, client }
    }
}

fn signed_percent(value: i32) -> String {
    if value > 0 {
        format!("+{}%", value)
    } else {
        format!("{}%", value)
    }
}

/// Renders the SSML document for a synthesis request.
pub(crate) fn ssml_document(text: &str, voice_id: &str, prosody: Prosody) -> String {
    let mut attrs = Vec::new();
    if prosody.pitch != 0 {
        attrs.push(format!("pitch=\"{}\"", signed_percent(prosody.pitch)));
    }
    if prosody.rate != 0 {
        attrs.push(format!("rate=\"{}\"", signed_percent(prosody.rate)));
    }

    let escaped = escape(text);
    let inner = if attrs.is_empty() {
        escaped.to_string()
    } else {
        format!("<prosody {}>{}</prosody>", attrs.join(" "), escaped)
    };

    format!(
        "<speak version=\"1.0\"><voice name=\"{}\">{}</voice></speak>",
        escape(voice_id),
        inner
    )
}

#[async_trait]
impl SpeechSynthesizer for WatsonTtsSynthesizer {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, SpeechError> {
        tracing::debug!(voice = %request.voice_id, format = request.format.name(), "Synthesizing speech");

        let builder = self
            .client
            .post(self.config.endpoint("/v1/synthesize"))
            .query(&[
                ("voice", request.voice_id.as_str()),
                ("accept", request.format.accept()),
            ])
            .basic_auth("apikey", Some(self.config.api_key()));

        let builder = if request.wants_ssml() {
            builder
                .header("Content-Type", "application/ssml+xml")
                .body(ssml_document(&request.text, &request.voice_id, request.prosody))
        } else {
            builder.json(&json!({ "text": request.text }))
        };

        let response = builder
            .send()
            .await
            .map_err(|e| self.config.map_send_error(e))?;

        let bytes = check_status(response)
            .await?
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        Ok(SynthesizedAudio {
            bytes: bytes.to_vec(),
            content_type: request.format.content_type().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssml_includes_signed_prosody() {
        let doc = ssml_document("Hello", "en-US_AllisonV3Voice", Prosody { pitch: 10, rate: -5 });
        assert_eq!(
            doc,
            "<speak version=\"1.0\"><voice name=\"en-US_AllisonV3Voice\">\
             <prosody pitch=\"+10%\" rate=\"-5%\">Hello</prosody></voice></speak>"
        );
    }

    #[test]
    fn ssml_escapes_text() {
        let doc = ssml_document("Tom & <Jerry>", "v", Prosody::default());
        assert!(doc.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!doc.contains("<prosody"));
    }
}
