//! Prompt endpoint handler.
//!
//! POST /api/v1/prompt
//!
//! Persists the user turn, forwards the bounded context to the completion
//! service, persists and returns the reply. Missing body fields are treated
//! as empty so they hit the same validation path as empty strings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the prompt endpoint.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Response body for a successful prompt.
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub reply: String,
}

/// POST /api/v1/prompt - handle a user prompt and return the generated reply.
pub async fn prompt(
    State(state): State<AppState>,
    Json(body): Json<PromptRequest>,
) -> Result<(StatusCode, Json<PromptResponse>), AppError> {
    let reply = state
        .chat_service
        .handle_prompt(
            body.chat_id.as_deref().unwrap_or(""),
            body.content.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PromptResponse { reply })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tolerates_missing_fields() {
        let body: PromptRequest = serde_json::from_str("{}").unwrap();
        assert!(body.chat_id.is_none());
        assert!(body.content.is_none());

        let body: PromptRequest =
            serde_json::from_str(r#"{"chat_id": "c1", "content": "Hello"}"#).unwrap();
        assert_eq!(body.chat_id.as_deref(), Some("c1"));
        assert_eq!(body.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_response_shape() {
        let resp = PromptResponse {
            reply: "Hi!".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"reply": "Hi!"}));
    }
}
