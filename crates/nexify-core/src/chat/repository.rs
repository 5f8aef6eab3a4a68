//! ChatRepository trait definition.
//!
//! Provides the persistence operations for chats and their messages.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in nexify-infra (e.g., `SqliteChatRepository`).

use chrono::{DateTime, Utc};
use nexify_types::chat::{Chat, ChatId, ChatMessage};
use nexify_types::error::RepositoryError;

/// Repository trait for chat and message persistence.
pub trait ChatRepository: Send + Sync {
    /// Atomic idempotent get-or-create.
    ///
    /// Inserts `candidate` if its id is unseen, otherwise leaves the stored
    /// row untouched. Returns the stored chat and whether it was created by
    /// this call. Concurrent callers racing on the same id must both
    /// succeed and observe the same row.
    fn get_or_create(
        &self,
        candidate: &Chat,
    ) -> impl std::future::Future<Output = Result<(Chat, bool), RepositoryError>> + Send;

    /// Get a chat by its id.
    fn get_chat(
        &self,
        id: &ChatId,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// Persist mutable chat fields (the title).
    ///
    /// Fails with `NotFound` if the chat row does not exist.
    fn update_chat(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message to its chat.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All messages of a chat, ordered by `created_at ASC` (ties broken by id).
    fn get_messages(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Chats created in `[start, end)`, ordered `created_at DESC`, capped at `limit`.
    fn list_chats_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Count all chats.
    fn count_chats(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Count all messages across all chats.
    fn count_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
