//! Chat listing and message history handlers.
//!
//! Endpoints:
//! - GET /api/v1/chats/today           - Chats created today, newest first
//! - GET /api/v1/chats/yesterday      - Chats created yesterday
//! - GET /api/v1/chats/last-seven-days - Chats created 2-7 days back
//! - GET /api/v1/chats/{id}/messages   - Full message history of a chat
//!
//! The day buckets are computed from a fresh `Utc::now()` per request, so a
//! process running across midnight keeps serving the right buckets.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use nexify_core::chat::buckets::DayBucket;
use nexify_types::chat::{Chat, ChatMessage};
use nexify_types::llm::MessageRole;

use crate::http::error::AppError;
use crate::state::AppState;

/// Listing entry for the day-bucket views.
#[derive(Debug, Serialize)]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<Chat> for ChatSummary {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id.0,
            title: chat.title,
            created_at: chat.created_at,
        }
    }
}

/// One message in the history view.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for MessageView {
    fn from(message: ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

async fn list_bucket(state: &AppState, bucket: DayBucket) -> Result<Json<Vec<ChatSummary>>, AppError> {
    let chats = state.chat_service.list_chats(bucket, Utc::now()).await?;
    Ok(Json(chats.into_iter().map(ChatSummary::from).collect()))
}

/// GET /api/v1/chats/today - chats created today, newest first, capped at 10.
pub async fn todays_chats(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSummary>>, AppError> {
    list_bucket(&state, DayBucket::Today).await
}

/// GET /api/v1/chats/yesterday - chats created yesterday.
pub async fn yesterdays_chats(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSummary>>, AppError> {
    list_bucket(&state, DayBucket::Yesterday).await
}

/// GET /api/v1/chats/last-seven-days - chats created 2-7 days back.
pub async fn last_seven_days_chats(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSummary>>, AppError> {
    list_bucket(&state, DayBucket::LastSevenDays).await
}

/// GET /api/v1/chats/{id}/messages - all messages of a chat, in order.
pub async fn chat_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let messages = state.chat_service.get_chat_messages(&chat_id).await?;
    Ok(Json(messages.into_iter().map(MessageView::from).collect()))
}
