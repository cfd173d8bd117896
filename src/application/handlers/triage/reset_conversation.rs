//! ResetConversation command handler.

use std::sync::Arc;

use crate::domain::foundation::ConversationId;
use crate::ports::ConversationStore;

#[derive(Debug, Clone)]
pub struct ResetConversationCommand {
    pub conversation_id: ConversationId,
}

pub struct ResetConversationHandler {
    store: Arc<dyn ConversationStore>,
}

impl ResetConversationHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Drops the conversation. Returns whether one existed; resetting an
    /// unknown id is not an error.
    pub async fn handle(&self, cmd: ResetConversationCommand) -> bool {
        let existed = self.store.reset(&cmd.conversation_id).await;
        tracing::debug!(conversation_id = %cmd.conversation_id, existed, "Conversation reset");
        existed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryConversationStore;
    use crate::domain::conversation::Message;

    #[tokio::test]
    async fn removes_existing_conversation() {
        let store = InMemoryConversationStore::new();
        let id = ConversationId::new("web-42").unwrap();
        store.append(&id, Message::user("headache").unwrap()).await;
        let handler = ResetConversationHandler::new(Arc::new(store.clone()));

        let existed = handler
            .handle(ResetConversationCommand {
                conversation_id: id.clone(),
            })
            .await;

        assert!(existed);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_a_no_op() {
        let handler = ResetConversationHandler::new(Arc::new(InMemoryConversationStore::new()));

        let existed = handler
            .handle(ResetConversationCommand {
                conversation_id: ConversationId::new("nobody").unwrap(),
            })
            .await;

        assert!(!existed);
    }
}
