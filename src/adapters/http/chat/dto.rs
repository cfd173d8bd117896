//! HTTP DTOs for the web chat endpoint.

use serde::{Deserialize, Serialize};

use crate::application::{RenderedReply, ReplyKind};
use crate::domain::triage::Assessment;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Omit to start a new conversation.
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub message: String,
    pub language: Option<String>,
    pub audio: Option<AudioPayload>,
    /// Include speech-ready text in the response.
    #[serde(default)]
    pub speak: bool,
}

/// Recorded audio sent inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPayload {
    /// Base64-encoded bytes.
    pub data: String,
    #[serde(default = "default_audio_content_type")]
    pub content_type: String,
}

fn default_audio_content_type() -> String {
    "audio/webm".to_string()
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: String,
    pub kind: ReplyKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl ChatResponse {
    pub fn from_reply(conversation_id: impl Into<String>, reply: RenderedReply) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            kind: reply.kind,
            text: reply.text,
            assessment: reply.assessment,
            tts_text: reply.tts_text,
            transcript: reply.transcript,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_fields_are_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.conversation_id.is_none());
        assert!(!req.speak);
    }

    #[test]
    fn audio_content_type_defaults_to_webm() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"audio":{"data":"AAEC"}}"#).unwrap();
        assert_eq!(req.audio.unwrap().content_type, "audio/webm");
    }

    #[test]
    fn response_omits_absent_fields() {
        let reply = RenderedReply {
            kind: ReplyKind::Command,
            text: "hello".to_string(),
            assessment: None,
            tts_text: None,
            transcript: None,
        };
        let json = serde_json::to_value(ChatResponse::from_reply("c1", reply)).unwrap();
        assert_eq!(json["conversationId"], "c1");
        assert_eq!(json["kind"], "command");
        assert!(json.get("assessment").is_none());
    }
}
