//! HandleInboundMessage command handler.
//!
//! The single entry point both channels use. Every inbound message runs the
//! same fixed sequence:
//!
//! 1. store sweep
//! 2. voice transcription when audio is attached
//! 3. emergency check (short-circuits, no model call)
//! 4. command check (short-circuits, no model call)
//! 5. intent classification and user message append
//! 6. assessment engine call on a released snapshot
//! 7. store update
//! 8. formatting
//!
//! The handler never fails: every error path ends in one of a small set of
//! fixed replies.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::application::handlers::voice::{
    TranscribeAudioCommand, TranscribeAudioError, TranscribeAudioHandler,
};
use crate::application::{AssessmentEngine, EngineError, IntentClassifier};
use crate::domain::conversation::{detect_language, Message};
use crate::domain::foundation::{ConversationId, ValidationError};
use crate::domain::intent::Intent;
use crate::domain::reply::messages::{
    CONVERSATION_CLEARED, EMERGENCY_MESSAGE, ERROR_MESSAGE, GOODBYE_MESSAGE, HELP_MESSAGE,
    NO_MESSAGE_RECEIVED, VOICE_ERROR_MESSAGE, VOICE_UNCLEAR_MESSAGE, WELCOME_MESSAGE,
};
use crate::domain::reply::{
    format_assessment, format_chat_reply, format_more_details, format_quick_reply,
    format_remedies, strip_markup, tts_text, Channel, Speakable,
};
use crate::domain::safety::{Command, CommandClassifier, EmergencyDetector};
use crate::domain::triage::{Assessment, ChatReply, Degraded, TriageOutcome};
use crate::ports::{Clock, ConversationStore, MediaFetcher};

// ════════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════════

/// Where attachment bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Uploaded inline (web chat).
    Bytes(Vec<u8>),
    /// Must be downloaded (WhatsApp media URL).
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub source: AttachmentSource,
    pub content_type: String,
}

impl Attachment {
    pub fn bytes(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            source: AttachmentSource::Bytes(data),
            content_type: content_type.into(),
        }
    }

    pub fn url(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            source: AttachmentSource::Url(url.into()),
            content_type: content_type.into(),
        }
    }

    pub fn is_audio(&self) -> bool {
        self.content_type.trim().to_lowercase().starts_with("audio")
    }
}

/// An inbound message from either channel.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub conversation_id: ConversationId,
    pub text: String,
    pub attachments: Vec<Attachment>,
    /// Explicit display language. Detected from the text when absent.
    pub language: Option<String>,
    pub channel: Channel,
    /// Also produce speech-ready text.
    pub speak: bool,
}

impl InboundMessage {
    pub fn new(conversation_id: ConversationId, text: impl Into<String>, channel: Channel) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            attachments: Vec::new(),
            language: None,
            channel,
            speak: false,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_speech(mut self, speak: bool) -> Self {
        self.speak = speak;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Result
// ════════════════════════════════════════════════════════════════════════════════

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Emergency,
    Command,
    Chat,
    Assessment,
    Goodbye,
    VoiceUnclear,
    VoiceError,
    NoMessage,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReply {
    pub kind: ReplyKind,
    pub text: String,
    /// Structured assessment, when one was produced this turn.
    pub assessment: Option<Assessment>,
    pub tts_text: Option<String>,
    /// What the user said, when the message arrived as audio.
    pub transcript: Option<String>,
}

impl RenderedReply {
    fn fixed(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            assessment: None,
            tts_text: None,
            transcript: None,
        }
    }

    fn with_transcript(mut self, transcript: Option<String>) -> Self {
        self.transcript = transcript;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// Empty or unusable inbound payload.
    #[error("invalid input: {0}")]
    Input(String),

    /// A generation, NLU or speech backend failed.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// An internal invariant did not hold.
    #[error("state error: {0}")]
    State(String),
}

impl TriageError {
    /// The fixed reply shown to the user for this error.
    pub fn reply(&self) -> RenderedReply {
        match self {
            Self::Input(_) => RenderedReply::fixed(ReplyKind::NoMessage, NO_MESSAGE_RECEIVED),
            Self::CollaboratorUnavailable(_) | Self::State(_) => {
                RenderedReply::fixed(ReplyKind::Error, ERROR_MESSAGE)
            }
        }
    }
}

impl From<ValidationError> for TriageError {
    fn from(err: ValidationError) -> Self {
        TriageError::Input(err.to_string())
    }
}

impl From<EngineError> for TriageError {
    fn from(err: EngineError) -> Self {
        TriageError::CollaboratorUnavailable(err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handler
// ════════════════════════════════════════════════════════════════════════════════

/// Text the rest of the pipeline sees, after optional transcription.
enum Resolved {
    Text { text: String, transcript: Option<String> },
    Reply(RenderedReply),
}

pub struct HandleInboundMessageHandler {
    store: Arc<dyn ConversationStore>,
    clock: Arc<dyn Clock>,
    emergency: EmergencyDetector,
    commands: CommandClassifier,
    intents: Arc<IntentClassifier>,
    engine: Arc<AssessmentEngine>,
    transcription: Arc<TranscribeAudioHandler>,
    media: Arc<dyn MediaFetcher>,
}

impl HandleInboundMessageHandler {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        clock: Arc<dyn Clock>,
        intents: Arc<IntentClassifier>,
        engine: Arc<AssessmentEngine>,
        transcription: Arc<TranscribeAudioHandler>,
        media: Arc<dyn MediaFetcher>,
    ) -> Self {
        Self {
            store,
            clock,
            emergency: EmergencyDetector::default(),
            commands: CommandClassifier::default(),
            intents,
            engine,
            transcription,
            media,
        }
    }

    pub fn with_emergency_detector(mut self, detector: EmergencyDetector) -> Self {
        self.emergency = detector;
        self
    }

    pub fn with_command_classifier(mut self, classifier: CommandClassifier) -> Self {
        self.commands = classifier;
        self
    }

    pub async fn handle(&self, msg: InboundMessage) -> RenderedReply {
        let conversation_id = msg.conversation_id.clone();
        match self.process(msg).await {
            Ok(reply) => reply,
            Err(e) => {
                match &e {
                    TriageError::Input(_) => tracing::debug!(%conversation_id, "Rejected input: {}", e),
                    _ => tracing::warn!(%conversation_id, "Triage failed: {}", e),
                }
                e.reply()
            }
        }
    }

    async fn process(&self, msg: InboundMessage) -> Result<RenderedReply, TriageError> {
        let removed = self.store.sweep(self.clock.now()).await;
        if removed > 0 {
            tracing::debug!(removed, "Swept idle conversations");
        }

        let id = msg.conversation_id.clone();
        let speak = msg.speak;
        let channel = msg.channel;

        let (text, transcript) = match self.resolve_text(&msg).await {
            Resolved::Text { text, transcript } => (text, transcript),
            Resolved::Reply(reply) => return Ok(reply),
        };

        if text.is_empty() {
            return Err(TriageError::Input("no message received".into()));
        }

        if let Some(phrase) = self.emergency.matched_phrase(&text) {
            tracing::info!(conversation_id = %id, phrase, "Emergency phrase detected");
            return Ok(self
                .speakable_fixed(ReplyKind::Emergency, EMERGENCY_MESSAGE, speak)
                .with_transcript(transcript));
        }

        if let Some(command) = self.commands.classify(&text) {
            tracing::debug!(conversation_id = %id, ?command, "Command matched");
            let reply_text = self.run_command(&id, command).await;
            return Ok(self
                .speakable_fixed(ReplyKind::Command, reply_text, speak)
                .with_transcript(transcript));
        }

        let classification = self.intents.classify(&text).await;
        tracing::debug!(conversation_id = %id, intent = %classification.intent, "Intent classified");
        if classification.intent == Intent::ConversationEnd {
            return Ok(self
                .speakable_fixed(ReplyKind::Goodbye, GOODBYE_MESSAGE, speak)
                .with_transcript(transcript));
        }

        let language = msg
            .language
            .clone()
            .unwrap_or_else(|| detect_language(&text).to_string());

        let user_message = Message::user(text)?.with_nlu(classification.annotation);
        self.store.append(&id, user_message).await;
        self.store.set_language(&id, &language).await;

        // Snapshot, then call the engine without holding any store lock.
        let snapshot = self
            .store
            .get(&id)
            .await
            .ok_or_else(|| TriageError::State(format!("conversation {} vanished after append", id)))?;

        let outcome = self.engine.analyze(snapshot.messages(), &language, false).await?;
        if outcome.is_degraded() {
            tracing::warn!(conversation_id = %id, "Model output recovered into degraded result");
        }

        let reply = match &outcome {
            TriageOutcome::Assessment(a) | TriageOutcome::Degraded(Degraded::Assessment(a)) => {
                self.record_assessment(&id, a).await?;
                let mut reply = RenderedReply::fixed(
                    ReplyKind::Assessment,
                    format_assessment(a, channel, transcript.as_deref()),
                );
                reply.assessment = Some(a.clone());
                if speak {
                    reply.tts_text = Some(tts_text(Speakable::Assessment(a)));
                }
                reply
            }
            TriageOutcome::Chat(c) | TriageOutcome::Degraded(Degraded::Chat(c)) => {
                self.record_chat(&id, c).await?;
                let mut reply = RenderedReply::fixed(
                    ReplyKind::Chat,
                    format_chat_reply(c, channel, transcript.as_deref()),
                );
                if speak {
                    reply.tts_text = Some(tts_text(Speakable::Chat(c)));
                }
                reply
            }
        };

        Ok(reply.with_transcript(transcript))
    }

    /// Produces the text to route: the typed body, or the transcript of the
    /// first audio attachment.
    async fn resolve_text(&self, msg: &InboundMessage) -> Resolved {
        let Some(audio) = msg.attachments.iter().find(|a| a.is_audio()) else {
            return Resolved::Text {
                text: msg.text.trim().to_string(),
                transcript: None,
            };
        };

        let bytes = match &audio.source {
            AttachmentSource::Bytes(data) => Ok(data.clone()),
            AttachmentSource::Url(url) => self.media.fetch(url).await,
        };
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => return Resolved::Reply(voice_failure(&e.to_string())),
        };

        let language = match &msg.language {
            Some(language) => Some(language.clone()),
            None => self
                .store
                .get(&msg.conversation_id)
                .await
                .and_then(|c| c.language().map(str::to_string)),
        };

        let mut cmd = TranscribeAudioCommand::new(bytes, audio.content_type.clone());
        if let Some(language) = language {
            cmd = cmd.with_language(language);
        }

        match self.transcription.handle(cmd).await {
            Ok(result) if result.transcription.is_unclear() => Resolved::Reply(
                RenderedReply::fixed(ReplyKind::VoiceUnclear, VOICE_UNCLEAR_MESSAGE),
            ),
            Ok(result) => {
                let transcript = result.transcription.transcript.trim().to_string();
                Resolved::Text {
                    text: transcript.clone(),
                    transcript: Some(transcript),
                }
            }
            Err(TranscribeAudioError::EmptyAudio) => Resolved::Reply(RenderedReply::fixed(
                ReplyKind::VoiceUnclear,
                VOICE_UNCLEAR_MESSAGE,
            )),
            Err(e) => Resolved::Reply(voice_failure(&e.to_string())),
        }
    }

    async fn run_command(&self, id: &ConversationId, command: Command) -> String {
        match command {
            Command::Welcome => WELCOME_MESSAGE.to_string(),
            Command::Help => HELP_MESSAGE.to_string(),
            Command::Reset => {
                self.store.reset(id).await;
                CONVERSATION_CLEARED.to_string()
            }
            Command::QuickReply(n) => {
                let last = self.last_assessment(id).await;
                format_quick_reply(n, last.as_ref())
            }
            Command::MoreDetails => format_more_details(self.last_assessment(id).await.as_ref()),
            Command::Remedies => format_remedies(self.last_assessment(id).await.as_ref()),
        }
    }

    async fn last_assessment(&self, id: &ConversationId) -> Option<Assessment> {
        self.store
            .get(id)
            .await
            .and_then(|c| c.last_assessment().cloned())
    }

    async fn record_assessment(
        &self,
        id: &ConversationId,
        assessment: &Assessment,
    ) -> Result<(), TriageError> {
        self.store.set_last_assessment(id, assessment.clone()).await;
        let summary = Message::assistant(format!("Assessment: {}", assessment.analysis))?;
        self.store.append(id, summary).await;
        Ok(())
    }

    async fn record_chat(&self, id: &ConversationId, chat: &ChatReply) -> Result<(), TriageError> {
        let message = Message::assistant(chat.reply.clone())?;
        self.store.append(id, message).await;
        Ok(())
    }

    fn speakable_fixed(&self, kind: ReplyKind, text: impl Into<String>, speak: bool) -> RenderedReply {
        let mut reply = RenderedReply::fixed(kind, text);
        if speak {
            reply.tts_text = Some(strip_markup(&reply.text));
        }
        reply
    }
}

fn voice_failure(error: &str) -> RenderedReply {
    tracing::warn!("Voice message could not be processed: {}", error);
    RenderedReply::fixed(ReplyKind::VoiceError, VOICE_ERROR_MESSAGE)
}
