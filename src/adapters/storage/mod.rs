//! Storage Adapters
//!
//! - **InMemoryConversationStore** - process-lifetime conversation memory
//!   with TTL expiry and a bounded message history

mod in_memory_conversation_store;

pub use in_memory_conversation_store::{InMemoryConversationStore, DEFAULT_CONVERSATION_TTL_SECS};
