//! HTTP handlers for the web chat endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::adapters::http::ErrorResponse;
use crate::application::{
    Attachment, HandleInboundMessageHandler, InboundMessage, ResetConversationCommand,
    ResetConversationHandler,
};
use crate::domain::foundation::ConversationId;
use crate::domain::reply::Channel;

use super::dto::{ChatRequest, ChatResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub inbound: Arc<HandleInboundMessageHandler>,
    pub reset: Arc<ResetConversationHandler>,
}

impl ChatAppState {
    pub fn new(
        inbound: Arc<HandleInboundMessageHandler>,
        reset: Arc<ResetConversationHandler>,
    ) -> Self {
        Self { inbound, reset }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/chat
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Send a typed or recorded message.
///
/// Always answers 200 with a rendered reply once the request is well formed;
/// collaborator failures show up as `kind: "error"`.
///
/// # Errors
/// - 400 Bad Request: invalid base64 audio
pub async fn send_chat_message(
    State(state): State<ChatAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let conversation_id = request
        .conversation_id
        .as_deref()
        .and_then(|id| ConversationId::new(id).ok())
        .unwrap_or_else(ConversationId::generate);

    let mut message = InboundMessage::new(conversation_id.clone(), request.message, Channel::Web)
        .with_speech(request.speak);
    if let Some(language) = request.language.filter(|l| !l.trim().is_empty()) {
        message = message.with_language(language);
    }
    if let Some(audio) = request.audio {
        let bytes = STANDARD
            .decode(audio.data.trim())
            .map_err(|e| ChatApiError::InvalidAudio(e.to_string()))?;
        message = message.with_attachment(Attachment::bytes(bytes, audio.content_type));
    }

    let reply = state.inbound.handle(message).await;
    Ok(Json(ChatResponse::from_reply(conversation_id.as_str(), reply)))
}

// ════════════════════════════════════════════════════════════════════════════════
// DELETE /api/chat/:conversation_id
// ════════════════════════════════════════════════════════════════════════════════

/// DELETE /api/chat/:conversation_id - Forget a conversation.
///
/// Idempotent: unknown ids also answer 204.
pub async fn reset_conversation(
    State(state): State<ChatAppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ChatApiError> {
    let conversation_id =
        ConversationId::new(conversation_id).map_err(|e| ChatApiError::InvalidId(e.to_string()))?;
    state
        .reset
        .handle(ResetConversationCommand { conversation_id })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum ChatApiError {
    #[error("invalid audio payload: {0}")]
    InvalidAudio(String),

    #[error("invalid conversation id: {0}")]
    InvalidId(String),
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self {
            ChatApiError::InvalidAudio(_) => "INVALID_AUDIO",
            ChatApiError::InvalidId(_) => "INVALID_CONVERSATION_ID",
        };
        let body = ErrorResponse::new(code, self.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
