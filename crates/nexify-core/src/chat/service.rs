//! Chat service orchestrating the prompt endpoint and the listing views.
//!
//! `handle_prompt` is the top-level operation: validate, upsert the chat,
//! re-title it, persist the user turn, build the bounded context, call the
//! completion service, persist the assistant turn, return the reply. The
//! listing views are thin pass-through filters over the repository.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use nexify_types::chat::{Chat, ChatId, ChatMessage};
use nexify_types::config::ChatConfig;
use nexify_types::error::ChatError;
use nexify_types::llm::CompletionRequest;

use crate::chat::buckets::DayBucket;
use crate::chat::context::build_context;
use crate::chat::repository::ChatRepository;
use crate::chat::title::{generate_title, seed_fallback};
use crate::llm::box_provider::BoxCompletionProvider;

/// Result cap for the day-bucket listing views.
const LIST_LIMIT: i64 = 10;

/// Orchestrates prompt handling and the read-only chat views.
///
/// Generic over `ChatRepository` so the orchestration logic is testable
/// against an in-memory store; the completion service is substitutable
/// through [`BoxCompletionProvider`].
pub struct ChatService<R: ChatRepository> {
    repo: R,
    provider: BoxCompletionProvider,
    config: ChatConfig,
}

impl<R: ChatRepository> ChatService<R> {
    /// Create a new chat service.
    pub fn new(repo: R, provider: BoxCompletionProvider, config: ChatConfig) -> Self {
        Self {
            repo,
            provider,
            config,
        }
    }

    /// Access the repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Handle a prompt: persist the user turn, get a completion, persist
    /// and return the reply.
    ///
    /// The user message commits before the completion call; an upstream
    /// failure leaves it in place and writes no assistant message. There is
    /// no retry and no compensating rollback.
    ///
    /// # Errors
    ///
    /// `ChatError::Validation` for an empty chat id or content,
    /// `ChatError::Upstream` when the completion service fails, and
    /// `ChatError::Repository` for storage errors.
    #[tracing::instrument(name = "handle_prompt", skip(self, content), fields(chat_id = %chat_id))]
    pub async fn handle_prompt(&self, chat_id: &str, content: &str) -> Result<String, ChatError> {
        if chat_id.is_empty() {
            return Err(ChatError::Validation("Chat ID was not provided.".to_string()));
        }
        if content.is_empty() {
            return Err(ChatError::Validation("There was no prompt passed.".to_string()));
        }

        let id = ChatId::new(chat_id);

        // Lazily create the chat; the candidate title is the truncation
        // fallback so the row is never stored untitled.
        let candidate = Chat {
            id: id.clone(),
            title: seed_fallback(content),
            created_at: Utc::now(),
        };
        let (mut chat, created) = self.repo.get_or_create(&candidate).await?;
        if created {
            info!(chat_id = %id, "chat created");
        }

        // The title is recomputed on every prompt, not cached after the first.
        chat.title = generate_title(&self.provider, &self.config.title_model, content).await;
        self.repo.update_chat(&chat).await?;

        self.repo
            .save_message(&ChatMessage::user(id.clone(), content))
            .await?;

        // History now includes the just-saved user turn.
        let history = self.repo.get_messages(&id).await?;
        let messages = build_context(&history, &self.config.context_window);

        let request = CompletionRequest {
            model: self.config.chat_model.clone(),
            messages,
            system: None,
            max_tokens: self.config.max_tokens,
            temperature: None,
        };
        let response = self.provider.complete(&request).await.map_err(|err| {
            warn!(chat_id = %id, error = %err, "completion service call failed");
            ChatError::upstream(&err)
        })?;

        self.repo
            .save_message(&ChatMessage::assistant(id, response.content.clone()))
            .await?;

        Ok(response.content)
    }

    /// List chats created in the given bucket at `now`, newest first,
    /// capped at 10.
    pub async fn list_chats(
        &self,
        bucket: DayBucket,
        now: DateTime<Utc>,
    ) -> Result<Vec<Chat>, ChatError> {
        let (start, end) = bucket.range(now);
        let chats = self
            .repo
            .list_chats_created_between(start, end, LIST_LIMIT)
            .await?;
        Ok(chats)
    }

    /// All messages of a chat, unfiltered, in storage order.
    ///
    /// # Errors
    ///
    /// `ChatError::NotFound` if no chat exists for the id.
    pub async fn get_chat_messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, ChatError> {
        let id = ChatId::new(chat_id);
        self.repo
            .get_chat(&id)
            .await?
            .ok_or(ChatError::NotFound)?;
        let messages = self.repo.get_messages(&id).await?;
        Ok(messages)
    }
}
