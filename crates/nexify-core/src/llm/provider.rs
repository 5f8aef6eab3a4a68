//! CompletionProvider trait definition.
//!
//! This is the narrow boundary to the external LLM completion service:
//! a request goes out, a reply or a failure comes back. No streaming and
//! no retries -- a failed call is terminal for the operation that made it.

use nexify_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion service backends (Groq in production, fakes in tests).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in nexify-infra (e.g., `GroqProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
