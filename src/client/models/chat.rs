//! Support chat models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// One message in the caller's support conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,

    /// "user" or "support"
    #[serde(default)]
    pub sender: String,

    #[serde(alias = "text")]
    pub message: String,

    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Body of `POST /chat/send`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendChatRequest {
    pub message: String,
}
