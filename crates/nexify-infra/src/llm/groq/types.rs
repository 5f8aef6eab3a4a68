//! Groq chat-completions API types.
//!
//! Groq speaks the OpenAI chat-completions protocol. These are the
//! wire-level request/response structures -- NOT the generic LLM types from
//! nexify-types, which are provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A single message in a Groq conversation.
#[derive(Debug, Clone, Serialize)]
pub struct GroqMessage {
    pub role: String,
    pub content: String,
}

/// Response body for a successful completion.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<GroqChoice>,
    #[serde(default)]
    pub usage: Option<GroqUsage>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqChoice {
    pub message: GroqChoiceMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage reported by Groq.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroqUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqErrorBody {
    pub error: GroqErrorDetail,
}

/// The error object inside an error body.
#[derive(Debug, Clone, Deserialize)]
pub struct GroqErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}
