//! Application state wiring all services together.
//!
//! AppState pins the service generics to the concrete infra
//! implementations: the SQLite repository and the Groq provider.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use nexify_core::chat::service::ChatService;
use nexify_core::llm::box_provider::BoxCompletionProvider;
use nexify_infra::config::{groq_api_key, load_chat_config, resolve_data_dir, API_KEY_ENV};
use nexify_infra::llm::groq::GroqProvider;
use nexify_infra::sqlite::chat::SqliteChatRepository;
use nexify_infra::sqlite::pool::DatabasePool;

/// Concrete type alias for the service generic pinned to the infra implementation.
pub type ConcreteChatService = ChatService<SqliteChatRepository>;

/// Shared application state holding the chat service.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire the service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("nexify.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_chat_config(&data_dir).await;

        let api_key = groq_api_key()
            .ok_or_else(|| anyhow::anyhow!("{API_KEY_ENV} environment variable is not set"))?;
        let provider = GroqProvider::new(
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let repo = SqliteChatRepository::new(db_pool);
        let chat_service = ChatService::new(repo, BoxCompletionProvider::new(provider), config);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            data_dir,
        })
    }
}
