//! Conversation Store Port - per-id conversational memory.
//!
//! Every operation is total: none of them fail under normal operation.
//! Mutations for one id are serialized by the implementation, so history
//! order and the message bound hold under concurrent requests. Callers take a
//! snapshot, release it, call collaborators, then write results back; no
//! caller holds a conversation across an external call.

use async_trait::async_trait;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::triage::Assessment;

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns a snapshot of the conversation, if present. No side effects.
    async fn get(&self, id: &ConversationId) -> Option<Conversation>;

    /// Returns the conversation, creating an empty one if absent.
    async fn get_or_create(&self, id: &ConversationId) -> Conversation;

    /// Appends a message, evicting the oldest past the bound.
    /// Creates the conversation if absent.
    async fn append(&self, id: &ConversationId, message: Message);

    /// Replaces the last assessment. Creates the conversation if absent.
    async fn set_last_assessment(&self, id: &ConversationId, assessment: Assessment);

    /// Records the display language. Creates the conversation if absent.
    async fn set_language(&self, id: &ConversationId, language: &str);

    /// Removes the conversation. Returns whether one existed.
    async fn reset(&self, id: &ConversationId) -> bool;

    /// Removes every conversation idle longer than the TTL at `now`.
    /// Returns the number removed.
    async fn sweep(&self, now: Timestamp) -> usize;

    /// Number of live conversations.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
