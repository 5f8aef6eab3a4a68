//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Prompt endpoint
        .route("/prompt", post(handlers::prompt::prompt))
        // Day-bucket listings
        .route("/chats/today", get(handlers::chats::todays_chats))
        .route("/chats/yesterday", get(handlers::chats::yesterdays_chats))
        .route(
            "/chats/last-seven-days",
            get(handlers::chats::last_seven_days_chats),
        )
        // Message history
        .route("/chats/{id}/messages", get(handlers::chats::chat_messages));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
