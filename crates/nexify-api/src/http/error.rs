//! Application error type mapping to HTTP status codes.
//!
//! Every failure surfaces as `{"error": message}` with the status dictated
//! by the error class: validation 400, missing chat 404, completion service
//! failure 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use nexify_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat operation errors (validation, not-found, upstream, storage).
    Chat(ChatError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Chat(ChatError::NotFound) => {
                (StatusCode::NOT_FOUND, "Chat not found.".to_string())
            }
            AppError::Chat(err @ ChatError::Upstream(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Chat(ChatError::Repository(err)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexify_types::error::RepositoryError;

    #[test]
    fn test_validation_maps_to_400_with_wire_message() {
        let err = AppError::from(ChatError::Validation("Chat ID was not provided.".to_string()));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Chat ID was not provided.");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from(ChatError::NotFound);
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Chat not found.");
    }

    #[test]
    fn test_upstream_maps_to_500_with_detail() {
        let err = AppError::from(ChatError::Upstream("provider error: HTTP 503".to_string()));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("HTTP 503"));
    }

    #[test]
    fn test_repository_maps_to_500() {
        let err = AppError::from(ChatError::from(RepositoryError::Connection));
        let (status, _) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
