//! Twilio WhatsApp webhook handler.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::{Attachment, HandleInboundMessageHandler, InboundMessage};
use crate::domain::foundation::ConversationId;
use crate::domain::reply::messages::NO_MESSAGE_RECEIVED;
use crate::domain::reply::Channel;

use super::dto::WhatsAppWebhook;
use super::twiml::{message_response, TWIML_CONTENT_TYPE};

#[derive(Clone)]
pub struct WhatsAppAppState {
    pub inbound: Arc<HandleInboundMessageHandler>,
}

impl WhatsAppAppState {
    pub fn new(inbound: Arc<HandleInboundMessageHandler>) -> Self {
        Self { inbound }
    }
}

/// POST /api/whatsapp - Twilio inbound message webhook.
///
/// The sender address is the conversation id. Always answers 200 with TwiML
/// so Twilio delivers the reply.
pub async fn receive_whatsapp_message(
    State(state): State<WhatsAppAppState>,
    Form(webhook): Form<WhatsAppWebhook>,
) -> Response {
    let conversation_id = match ConversationId::new(webhook.from.as_str()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("WhatsApp webhook without sender");
            return twiml(NO_MESSAGE_RECEIVED);
        }
    };

    let mut message = InboundMessage::new(conversation_id, webhook.body.as_str(), Channel::WhatsApp);
    if let Some((url, content_type)) = webhook.first_media() {
        message = message.with_attachment(Attachment::url(url, content_type));
    }

    let reply = state.inbound.handle(message).await;
    twiml(&reply.text)
}

fn twiml(text: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)],
        message_response(text),
    )
        .into_response()
}
