//! Chat and message types for Nexify.
//!
//! A `Chat` is a conversation thread identified by a client-supplied opaque
//! id. Its `ChatMessage` children are ordered by `created_at` (ties broken
//! by the time-sortable UUID v7 message id).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

// Re-export MessageRole from the llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// Opaque chat identifier supplied by the client.
///
/// Never generated server-side: the first prompt for an unseen id creates
/// the chat, subsequent prompts reuse it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A conversation thread.
///
/// `title` is recomputed on every prompt and is never empty by
/// construction: it holds either a generated title or the truncated
/// fallback of the triggering message. `created_at` is set once at
/// creation and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A single turn within a chat.
///
/// Messages are created exactly twice per successful prompt cycle (one
/// user, one assistant), never mutated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: ChatId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a user-turn message timestamped now.
    pub fn user(chat_id: ChatId, content: impl Into<String>) -> Self {
        Self::new(chat_id, MessageRole::User, content)
    }

    /// Build an assistant-turn message timestamped now.
    pub fn assistant(chat_id: ChatId, content: impl Into<String>) -> Self {
        Self::new(chat_id, MessageRole::Assistant, content)
    }

    fn new(chat_id: ChatId, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            chat_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
