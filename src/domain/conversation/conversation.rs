//! Conversation aggregate.
//!
//! One `Conversation` per end user. The Conversation Store owns every
//! instance; callers only ever see cloned snapshots.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::triage::Assessment;

use super::message::{Message, Role};

/// Default bound on stored messages per conversation.
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Per-user conversational memory.
///
/// # Invariants
///
/// - `messages.len() <= max_messages` after every append (oldest evicted first)
/// - `last_activity` never moves backwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
    last_assessment: Option<Assessment>,
    last_activity: Timestamp,
    language: Option<String>,
}

impl Conversation {
    /// Creates an empty conversation active at `now`.
    pub fn new(id: ConversationId, now: Timestamp) -> Self {
        Self {
            id,
            messages: Vec::new(),
            last_assessment: None,
            last_activity: now,
            language: None,
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Appends a message, evicting from the front until at most `max_messages` remain.
    pub fn append(&mut self, message: Message, max_messages: usize, now: Timestamp) {
        self.messages.push(message);
        if self.messages.len() > max_messages {
            let excess = self.messages.len() - max_messages;
            self.messages.drain(..excess);
        }
        self.touch(now);
    }

    /// Replaces the last assessment wholesale.
    pub fn set_last_assessment(&mut self, assessment: Assessment, now: Timestamp) {
        self.last_assessment = Some(assessment);
        self.touch(now);
    }

    pub fn set_language(&mut self, language: impl Into<String>, now: Timestamp) {
        self.language = Some(language.into());
        self.touch(now);
    }

    /// Advances `last_activity` to `now` unless it is already later.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = self.last_activity.max(now);
    }

    /// Number of user messages in the stored (bounded) history.
    pub fn user_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role() == Role::User).count()
    }

    /// The most recent `window` messages, oldest first.
    pub fn recent(&self, window: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }

    /// True when the conversation has been idle for strictly longer than `ttl`.
    pub fn is_expired(&self, now: Timestamp, ttl: Duration) -> bool {
        now.elapsed_since(self.last_activity) > ttl
    }
}
