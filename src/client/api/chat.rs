//! Support chat API trait

use async_trait::async_trait;

use crate::client::models::ChatMessage;
use crate::error::Result;

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Messages newer than `since` (a message ID), or the whole
    /// conversation. Polled, so never cached.
    async fn chat_messages(&self, since: Option<&str>) -> Result<Vec<ChatMessage>>;

    async fn send_chat_message(&self, message: &str) -> Result<ChatMessage>;
}
