//! In-Memory Conversation Store Adapter
//!
//! Keeps conversations in a single map behind an async `RwLock`. Every
//! operation takes the lock once and releases it before returning, so each
//! mutation is a short critical section and concurrent writers for the same
//! id are serialized. Nothing is held across collaborator calls.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::clock::SystemClock;
use crate::domain::conversation::{Conversation, Message, DEFAULT_MAX_MESSAGES};
use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::triage::Assessment;
use crate::ports::{Clock, ConversationStore};

pub const DEFAULT_CONVERSATION_TTL_SECS: u64 = 3600;

/// In-memory storage for conversations.
#[derive(Clone)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    max_messages: usize,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(SystemClock),
            ttl: Duration::seconds(DEFAULT_CONVERSATION_TTL_SECS as i64),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Duration::seconds(secs.min(u32::MAX as u64) as i64);
        self
    }

    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages.max(1);
        self
    }

    /// Runs `f` on the conversation for `id`, creating it first if absent.
    async fn with_conversation<F>(&self, id: &ConversationId, f: F)
    where
        F: FnOnce(&mut Conversation, Timestamp),
    {
        let now = self.clock.now();
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation::new(id.clone(), now));
        f(conversation, now);
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: &ConversationId) -> Option<Conversation> {
        self.conversations.read().await.get(id).cloned()
    }

    async fn get_or_create(&self, id: &ConversationId) -> Conversation {
        let now = self.clock.now();
        let mut conversations = self.conversations.write().await;
        conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation::new(id.clone(), now))
            .clone()
    }

    async fn append(&self, id: &ConversationId, message: Message) {
        let max = self.max_messages;
        self.with_conversation(id, |c, now| c.append(message, max, now))
            .await;
    }

    async fn set_last_assessment(&self, id: &ConversationId, assessment: Assessment) {
        self.with_conversation(id, |c, now| c.set_last_assessment(assessment, now))
            .await;
    }

    async fn set_language(&self, id: &ConversationId, language: &str) {
        self.with_conversation(id, |c, now| c.set_language(language, now))
            .await;
    }

    async fn reset(&self, id: &ConversationId) -> bool {
        self.conversations.write().await.remove(id).is_some()
    }

    async fn sweep(&self, now: Timestamp) -> usize {
        let mut conversations = self.conversations.write().await;
        let before = conversations.len();
        conversations.retain(|_, c| !c.is_expired(now, self.ttl));
        let removed = before - conversations.len();
        if removed > 0 {
            tracing::debug!(removed, "Swept expired conversations");
        }
        removed
    }

    async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::domain::triage::UrgencyLevel;

    fn id(s: &str) -> ConversationId {
        ConversationId::new(s).unwrap()
    }

    fn store_with_clock() -> (InMemoryConversationStore, ManualClock) {
        let clock = ManualClock::starting_at_unix(1_700_000_000);
        let store = InMemoryConversationStore::new()
            .with_clock(Arc::new(clock.clone()))
            .with_ttl_secs(3600);
        (store, clock)
    }

    mod basic_operations {
        use super::*;

        #[tokio::test]
        async fn get_returns_none_for_unknown_id() {
            let store = InMemoryConversationStore::new();
            assert!(store.get(&id("a")).await.is_none());
            assert_eq!(store.len().await, 0);
        }

        #[tokio::test]
        async fn get_or_create_creates_once() {
            let (store, clock) = store_with_clock();
            let first = store.get_or_create(&id("a")).await;
            clock.advance_secs(10);
            let second = store.get_or_create(&id("a")).await;

            assert_eq!(first.last_activity(), second.last_activity());
            assert_eq!(store.len().await, 1);
        }

        #[tokio::test]
        async fn append_creates_and_touches() {
            let (store, clock) = store_with_clock();
            clock.advance_secs(5);
            store.append(&id("a"), Message::user("hello").unwrap()).await;

            let conv = store.get(&id("a")).await.unwrap();
            assert_eq!(conv.messages().len(), 1);
            assert_eq!(conv.last_activity(), clock.now());
        }

        #[tokio::test]
        async fn append_respects_bound() {
            let store = InMemoryConversationStore::new().with_max_messages(3);
            for i in 0..5 {
                store
                    .append(&id("a"), Message::user(format!("m{}", i)).unwrap())
                    .await;
            }
            let conv = store.get(&id("a")).await.unwrap();
            let contents: Vec<_> = conv.messages().iter().map(|m| m.content()).collect();
            assert_eq!(contents, vec!["m2", "m3", "m4"]);
        }

        #[tokio::test]
        async fn set_last_assessment_replaces() {
            let store = InMemoryConversationStore::new();
            let mut a = Assessment::degraded("first");
            store.set_last_assessment(&id("a"), a.clone()).await;
            a.urgency_level = UrgencyLevel::High;
            store.set_last_assessment(&id("a"), a).await;

            let conv = store.get(&id("a")).await.unwrap();
            assert_eq!(conv.last_assessment().unwrap().urgency_level, UrgencyLevel::High);
        }

        #[tokio::test]
        async fn set_language_records_label() {
            let store = InMemoryConversationStore::new();
            store.set_language(&id("a"), "Spanish").await;
            assert_eq!(store.get(&id("a")).await.unwrap().language(), Some("Spanish"));
        }

        #[tokio::test]
        async fn reset_removes_conversation() {
            let store = InMemoryConversationStore::new();
            store.append(&id("a"), Message::user("x").unwrap()).await;
            assert!(store.reset(&id("a")).await);
            assert!(!store.reset(&id("a")).await);
            assert!(store.get(&id("a")).await.is_none());
        }
    }

    mod sweeping {
        use super::*;

        #[tokio::test]
        async fn sweep_removes_only_strictly_expired() {
            let (store, clock) = store_with_clock();
            store.get_or_create(&id("old")).await;
            clock.advance_secs(1800);
            store.get_or_create(&id("young")).await;

            // "old" is idle exactly one TTL: kept.
            clock.advance_secs(1800);
            assert_eq!(store.sweep(clock.now()).await, 0);

            clock.advance_secs(1);
            assert_eq!(store.sweep(clock.now()).await, 1);
            assert!(store.get(&id("old")).await.is_none());
            assert!(store.get(&id("young")).await.is_some());
        }

        #[tokio::test]
        async fn activity_extends_lifetime() {
            let (store, clock) = store_with_clock();
            store.get_or_create(&id("a")).await;
            clock.advance_secs(3000);
            store.append(&id("a"), Message::user("still here").unwrap()).await;
            clock.advance_secs(3000);

            assert_eq!(store.sweep(clock.now()).await, 0);
        }

        #[tokio::test]
        async fn sweep_is_idempotent() {
            let (store, clock) = store_with_clock();
            store.get_or_create(&id("a")).await;
            clock.advance_secs(7200);
            assert_eq!(store.sweep(clock.now()).await, 1);
            assert_eq!(store.sweep(clock.now()).await, 0);
        }
    }

    mod concurrency {
        use super::*;

        #[tokio::test]
        async fn concurrent_appends_keep_bound_and_lose_nothing_recent() {
            let store = InMemoryConversationStore::new().with_max_messages(10);
            let mut handles = Vec::new();
            for i in 0..50 {
                let store = store.clone();
                handles.push(tokio::spawn(async move {
                    store
                        .append(&id("same"), Message::user(format!("m{}", i)).unwrap())
                        .await;
                }));
            }
            for h in handles {
                h.await.unwrap();
            }

            let conv = store.get(&id("same")).await.unwrap();
            assert_eq!(conv.messages().len(), 10);
            assert_eq!(store.len().await, 1);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sweep_removes_exactly_the_expired_set(
                idle_secs in proptest::collection::vec(0u64..7200, 1..20),
                ttl in 1u64..3600,
            ) {
                let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                rt.block_on(async {
                    let clock = ManualClock::starting_at_unix(1_700_000_000);
                    let store = InMemoryConversationStore::new()
                        .with_clock(Arc::new(clock.clone()))
                        .with_ttl_secs(ttl);
                    let start = clock.now();
                    let horizon = 7200;

                    // Conversation i was last active `idle_secs[i]` before the horizon.
                    for (i, idle) in idle_secs.iter().enumerate() {
                        clock.set(start.plus_secs(horizon - idle));
                        store.get_or_create(&id(&format!("c{}", i))).await;
                    }
                    let now = start.plus_secs(horizon);
                    let expected = idle_secs.iter().filter(|idle| **idle > ttl).count();

                    prop_assert_eq!(store.sweep(now).await, expected);
                    for (i, idle) in idle_secs.iter().enumerate() {
                        let present = store.get(&id(&format!("c{}", i))).await.is_some();
                        prop_assert_eq!(present, *idle <= ttl);
                    }
                    Ok(())
                })?;
            }
        }
    }
}
