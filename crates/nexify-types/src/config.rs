//! Chat configuration types for Nexify.
//!
//! `ChatConfig` represents the optional `config.toml` in the data
//! directory. All fields have defaults that reproduce the stock behavior;
//! the file only needs to exist to override them.

use serde::{Deserialize, Serialize};

/// Which end of the conversation the context window is anchored to.
///
/// `Oldest` submits the earliest turns of the chat to the model (the stock
/// behavior); `Newest` is the conventional sliding window over the most
/// recent turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextAnchor {
    Oldest,
    Newest,
}

/// Bounded message window submitted to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    /// Maximum number of persisted messages included.
    #[serde(default = "default_window_size")]
    pub size: usize,
    #[serde(default = "default_window_anchor")]
    pub anchor: ContextAnchor,
}

fn default_window_size() -> usize {
    10
}

fn default_window_anchor() -> ContextAnchor {
    ContextAnchor::Oldest
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            size: default_window_size(),
            anchor: default_window_anchor(),
        }
    }
}

/// Top-level configuration for the prompt endpoint.
///
/// Loaded from `{data_dir}/config.toml` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model used for the main conversation completion.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Fast-tier model used for title generation.
    #[serde(default = "default_title_model")]
    pub title_model: String,

    /// Output cap for the main completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Context window policy for the main completion.
    #[serde(default)]
    pub context_window: ContextWindow,

    /// Outbound request timeout for the completion service, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_chat_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_title_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            chat_model: default_chat_model(),
            title_model: default_title_model(),
            max_tokens: default_max_tokens(),
            context_window: ContextWindow::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
