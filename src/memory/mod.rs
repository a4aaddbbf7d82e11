//! Conversational memory stores.
//!
//! The step loop never reads or writes memory on its own; callers persist a
//! finished run through [`Agent::save_history`](crate::Agent::save_history)
//! and seed new prompts from [`ChatMemory::last_n`].

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::types::Message;

/// A store of per-conversation message transcripts.
#[async_trait]
pub trait ChatMemory: Send + Sync {
    /// Append messages to the end of a conversation
    async fn append(&self, conversation_id: &str, messages: Vec<Message>) -> crate::Result<()>;

    /// The most recent `n` messages of a conversation, oldest first
    async fn last_n(&self, conversation_id: &str, n: usize) -> crate::Result<Vec<Message>>;

    async fn clear(&self, conversation_id: &str) -> crate::Result<()>;
}

/// Process-local [`ChatMemory`] backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatMemory {
    conversations: Arc<DashMap<String, Vec<Message>>>,
}

impl InMemoryChatMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_ids(&self) -> Vec<String> {
        self.conversations.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self, conversation_id: &str) -> usize {
        self.conversations
            .get(conversation_id)
            .map(|messages| messages.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ChatMemory for InMemoryChatMemory {
    async fn append(&self, conversation_id: &str, messages: Vec<Message>) -> crate::Result<()> {
        self.conversations
            .entry(conversation_id.to_string())
            .or_default()
            .extend(messages);
        Ok(())
    }

    async fn last_n(&self, conversation_id: &str, n: usize) -> crate::Result<Vec<Message>> {
        Ok(self
            .conversations
            .get(conversation_id)
            .map(|messages| {
                let skip = messages.len().saturating_sub(n);
                messages[skip..].to_vec()
            })
            .unwrap_or_default())
    }

    async fn clear(&self, conversation_id: &str) -> crate::Result<()> {
        self.conversations.remove(conversation_id);
        Ok(())
    }
}
