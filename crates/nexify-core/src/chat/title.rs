//! Chat title generation via the completion service.
//!
//! `generate_title` asks the fast model tier for a short descriptive label
//! based on the user's prompt. Failures are fully absorbed: the caller
//! always receives a usable title, falling back to a truncation of the
//! seed text.

use nexify_types::llm::{CompletionRequest, Message, MessageRole};

use crate::llm::box_provider::BoxCompletionProvider;

/// System prompt for the title generation call.
const TITLE_SYSTEM_PROMPT: &str = "Generate a short, descriptive title (max 5 words).";

/// Maximum characters kept from the seed when falling back.
const FALLBACK_CHARS: usize = 50;

/// Generate a title for a chat from the message that triggered it.
///
/// Sends the seed text as the sole user turn with a fixed title
/// instruction. On success the trimmed completion text is returned; on any
/// provider failure the result is [`seed_fallback`] of the seed. The
/// failure never propagates.
#[tracing::instrument(name = "generate_title", skip(provider, seed), fields(model = %model))]
pub async fn generate_title(provider: &BoxCompletionProvider, model: &str, seed: &str) -> String {
    let request = CompletionRequest {
        model: model.to_string(),
        messages: vec![Message::new(MessageRole::User, seed)],
        system: Some(TITLE_SYSTEM_PROMPT.to_string()),
        max_tokens: 50,
        temperature: Some(0.3),
    };

    match provider.complete(&request).await {
        Ok(response) => response.content.trim().to_string(),
        Err(err) => {
            tracing::debug!(error = %err, "title generation failed, using truncated seed");
            seed_fallback(seed)
        }
    }
}

/// First [`FALLBACK_CHARS`] characters of the seed (the whole seed if
/// shorter). Counts characters, not bytes, so multi-byte text never splits
/// a boundary.
pub fn seed_fallback(seed: &str) -> String {
    seed.chars().take(FALLBACK_CHARS).collect()
}
