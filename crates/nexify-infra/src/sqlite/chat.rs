//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `nexify-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reader for SELECTs,
//! writer for mutations.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use nexify_core::chat::repository::ChatRepository;
use nexify_types::chat::{Chat, ChatId, ChatMessage};
use nexify_types::error::RepositoryError;
use nexify_types::llm::MessageRole;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: String,
    title: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let created_at = parse_datetime(&self.created_at)?;
        Ok(Chat {
            id: ChatId::new(self.id),
            title: self.title,
            created_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: String,
    chat_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            chat_id: ChatId::new(self.chat_id),
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn get_or_create(&self, candidate: &Chat) -> Result<(Chat, bool), RepositoryError> {
        // The conflict clause makes concurrent upserts on the same id safe:
        // exactly one racer inserts, both read back the same row.
        let result = sqlx::query(
            "INSERT INTO chats (id, title, created_at) VALUES (?, ?, ?) ON CONFLICT(id) DO NOTHING",
        )
        .bind(candidate.id.as_str())
        .bind(&candidate.title)
        .bind(format_datetime(&candidate.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let created = result.rows_affected() > 0;

        let chat = self
            .get_chat(&candidate.id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok((chat, created))
    }

    async fn get_chat(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn update_chat(&self, chat: &Chat) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE chats SET title = ? WHERE id = ?")
            .bind(&chat.title)
            .bind(chat.id.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO chat_messages (id, chat_id, role, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.chat_id.as_str())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, chat_id: &ChatId) -> Result<Vec<ChatMessage>, RepositoryError> {
        // UUID v7 ids are time-ordered, so the id tie-break preserves
        // insertion order for equal timestamps.
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(chat_id.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = ChatMessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn list_chats_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chats WHERE created_at >= ? AND created_at < ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(format_datetime(&start))
        .bind(format_datetime(&end))
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row =
                ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }

    async fn count_chats(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chats")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn count_messages(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_messages")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_chat(id: &str) -> Chat {
        Chat {
            id: ChatId::new(id),
            title: "Untitled".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_inserts_then_reuses() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let candidate = make_chat("c1");
        let (chat, created) = repo.get_or_create(&candidate).await.unwrap();
        assert!(created);
        assert_eq!(chat.id.as_str(), "c1");
        assert_eq!(chat.title, "Untitled");

        // Second call with a different candidate leaves the stored row alone.
        let mut other = make_chat("c1");
        other.title = "Different".to_string();
        let (chat, created) = repo.get_or_create(&other).await.unwrap();
        assert!(!created);
        assert_eq!(chat.title, "Untitled");
        assert_eq!(chat.created_at, candidate.created_at);
    }

    #[tokio::test]
    async fn test_get_chat_missing_returns_none() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let found = repo.get_chat(&ChatId::new("absent")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_chat_title() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let mut chat = make_chat("c1");
        repo.get_or_create(&chat).await.unwrap();

        chat.title = "Rust borrow checker".to_string();
        repo.update_chat(&chat).await.unwrap();

        let found = repo.get_chat(&chat.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Rust borrow checker");
    }

    #[tokio::test]
    async fn test_update_missing_chat_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let chat = make_chat("ghost");
        let err = repo.update_chat(&chat).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_save_and_get_messages_ordered() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let chat = make_chat("c1");
        repo.get_or_create(&chat).await.unwrap();

        let mut first = ChatMessage::user(chat.id.clone(), "Hello");
        let mut second = ChatMessage::assistant(chat.id.clone(), "Hi there!");
        first.created_at = Utc::now() - Duration::seconds(2);
        second.created_at = Utc::now() - Duration::seconds(1);

        // Insert out of order; the query sorts by created_at.
        repo.save_message(&second).await.unwrap();
        repo.save_message(&first).await.unwrap();

        let messages = repo.get_messages(&chat.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].content, "Hi there!");
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_message_requires_existing_chat() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let orphan = ChatMessage::user(ChatId::new("no-such-chat"), "Hello");
        let err = repo.save_message(&orphan).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn test_list_chats_created_between() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let now = Utc::now();
        for (id, age_days) in [("today-a", 0), ("today-b", 0), ("old", 3)] {
            let chat = Chat {
                id: ChatId::new(id),
                title: id.to_string(),
                created_at: now - Duration::days(age_days),
            };
            repo.get_or_create(&chat).await.unwrap();
        }

        let listed = repo
            .list_chats_created_between(now - Duration::hours(1), now + Duration::hours(1), 10)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|c| c.id.as_str().starts_with("today")));

        // Window boundaries are half-open: [start, end).
        let exact = repo
            .list_chats_created_between(now - Duration::days(3), now - Duration::days(3), 10)
            .await
            .unwrap();
        assert!(exact.is_empty());
    }

    #[tokio::test]
    async fn test_counts() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        assert_eq!(repo.count_chats().await.unwrap(), 0);
        assert_eq!(repo.count_messages().await.unwrap(), 0);

        let chat = make_chat("c1");
        repo.get_or_create(&chat).await.unwrap();
        repo.save_message(&ChatMessage::user(chat.id.clone(), "Hello"))
            .await
            .unwrap();
        repo.save_message(&ChatMessage::assistant(chat.id.clone(), "Hi"))
            .await
            .unwrap();

        assert_eq!(repo.count_chats().await.unwrap(), 1);
        assert_eq!(repo.count_messages().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_chats_orders_desc_and_caps() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool);

        let now = Utc::now();
        for i in 0..12 {
            let chat = Chat {
                id: ChatId::new(format!("c{i}")),
                title: format!("chat {i}"),
                created_at: now - Duration::minutes(i),
            };
            repo.get_or_create(&chat).await.unwrap();
        }

        let listed = repo
            .list_chats_created_between(now - Duration::hours(1), now + Duration::hours(1), 10)
            .await
            .unwrap();
        assert_eq!(listed.len(), 10);
        // Newest first: c0 is the most recent.
        assert_eq!(listed[0].id.as_str(), "c0");
        assert_eq!(listed[9].id.as_str(), "c9");
    }
}
