//! Configuration loading for Nexify.
//!
//! Reads `config.toml` from the data directory (`~/.nexify/` in production)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when the
//! file is missing or malformed. The Groq API key is taken from the
//! environment only and wrapped in [`SecretString`] immediately.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use nexify_types::config::ChatConfig;

/// Environment variable holding the Groq API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Resolve the data directory from `NEXIFY_DATA_DIR`, falling back to
/// `~/.nexify`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("NEXIFY_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".nexify")
        }
    }
}

/// Load chat configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_chat_config(data_dir: &Path) -> ChatConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ChatConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ChatConfig::default();
        }
    };

    match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ChatConfig::default()
        }
    }
}

/// Read the Groq API key from the environment.
///
/// Returns `None` when unset or empty. The key goes straight into a
/// [`SecretString`] so it never lingers as a plain `String`.
pub fn groq_api_key() -> Option<SecretString> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Some(SecretString::from(key)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexify_types::config::ContextAnchor;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_chat_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_chat_config(tmp.path()).await;
        assert_eq!(config.chat_model, "llama-3.1-8b-instant");
        assert_eq!(config.context_window.size, 10);
    }

    #[tokio::test]
    async fn load_chat_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
chat_model = "llama-3.3-70b-versatile"
max_tokens = 2048

[context_window]
size = 20
anchor = "newest"
"#,
        )
        .await
        .unwrap();

        let config = load_chat_config(tmp.path()).await;
        assert_eq!(config.chat_model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.context_window.size, 20);
        assert_eq!(config.context_window.anchor, ContextAnchor::Newest);
        // Unspecified fields keep their defaults.
        assert_eq!(config.title_model, "llama-3.1-8b-instant");
    }

    #[tokio::test]
    async fn load_chat_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "chat_model = [not valid").await.unwrap();

        let config = load_chat_config(tmp.path()).await;
        assert_eq!(config.chat_model, "llama-3.1-8b-instant");
    }
}
