//! GroqProvider -- concrete [`CompletionProvider`] implementation for the
//! Groq chat-completions API.
//!
//! Sends requests to `/chat/completions` (OpenAI-compatible protocol) with
//! bearer authentication. Non-streaming only: one request, one reply or one
//! failure. No retries -- the orchestration core treats a failed call as
//! terminal.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use nexify_core::llm::provider::CompletionProvider;
use nexify_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use self::types::{GroqErrorBody, GroqMessage, GroqRequest, GroqResponse};

/// Default Groq API endpoint (OpenAI-compatible).
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq completion provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the authorization header. The struct intentionally does NOT
/// derive Debug, so the key can never leak through debug formatting.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider.
    ///
    /// `timeout` bounds each outbound call; there is no cancellation
    /// mechanism once a request is dispatched, so this is the only lever on
    /// worst-case latency.
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Convert a generic [`CompletionRequest`] into a [`GroqRequest`].
    ///
    /// The optional system instruction becomes a leading system-role message,
    /// ahead of the conversation turns.
    fn to_groq_request(&self, request: &CompletionRequest) -> GroqRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system) = request.system {
            messages.push(GroqMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(GroqMessage {
                role: msg.role.to_string(),
                content: msg.content.clone(),
            });
        }

        GroqRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Map a non-success HTTP status and its body to an [`LlmError`].
///
/// The body is the Groq error envelope when parseable, otherwise raw text.
fn map_status_error(status: u16, body: &str) -> LlmError {
    let detail = serde_json::from_str::<GroqErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        400..=499 => LlmError::InvalidRequest(detail),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {detail}"),
        },
    }
}

impl CompletionProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_groq_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), &error_body));
        }

        let groq_resp: GroqResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        // A 2xx body with no choices is as unusable as any other failure.
        let content = groq_resp
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| {
                LlmError::Deserialization("response contained no choices".to_string())
            })?;

        let usage = groq_resp.usage.unwrap_or_default();

        Ok(CompletionResponse {
            id: groq_resp.id,
            content,
            model: groq_resp.model,
            usage: Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }
}
