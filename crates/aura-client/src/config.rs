//! Client configuration loader.
//!
//! Reads `config.toml` from the Aura config directory (`~/.config/aura/`
//! on Linux) and deserializes it into [`ClientConfig`]. Falls back to
//! defaults when the file is missing or malformed. The `AURA_API_URL`
//! environment variable overrides the configured base URL.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default base URL of the support service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "AURA_API_URL";

/// Settings for talking to the remote support service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// The Aura config directory, if the platform exposes one.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("aura"))
}

/// Load client configuration from `{config_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_client_config(config_dir: &Path) -> ClientConfig {
    let config_path = config_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Resolve the effective base URL.
///
/// Priority: environment override, then the configured value. A trailing
/// slash is stripped so endpoint paths can always start with `/`.
pub fn resolve_base_url(config: &ClientConfig, env_override: Option<String>) -> String {
    let url = env_override
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.base_url.clone());
    url.trim_end_matches('/').to_string()
}
