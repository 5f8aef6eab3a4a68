use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in nexify-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the prompt-handling and chat-query operations.
///
/// The `Validation` payload is the exact wire message returned to the
/// client. Title-generation failures never appear here: they are absorbed
/// into a truncation fallback and the caller cannot observe them.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("chat not found")]
    NotFound,

    #[error("completion service error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ChatError {
    /// Upstream failure carrying the provider's detail string.
    pub fn upstream(err: &LlmError) -> Self {
        ChatError::Upstream(err.to_string())
    }
}
