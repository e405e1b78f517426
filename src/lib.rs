pub mod api;
pub mod artifact;
pub mod download;
pub mod error;
pub mod payload;
pub mod signature;

use error::{ListenerError, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Listener configuration, loaded once at startup and immutable afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct ListenerConfig {
    /// Base URL of the artifact repository, e.g. "https://nexus.example.org"
    pub base_repository_url: String,
    /// Shared secret the repository signs webhook payloads with
    pub secret_key: String,
    /// Artifact-type suffixes considered relevant, e.g. ["portlet"]
    pub artifact_types: Vec<String>,
    /// Port to listen on
    pub port: u16,
    /// Where downloaded artifacts are placed. When unset, derived URLs are
    /// only logged and no download is attempted.
    pub destination_dir: Option<PathBuf>,
}

/// Load and parse the configuration file
pub fn load_config(path: &str) -> Result<ListenerConfig> {
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        ListenerError::ConfigError(format!("Failed to read config file '{}': {}", path, e))
    })?;

    let config: ListenerConfig = toml::from_str(&config_str).map_err(|e| {
        ListenerError::ConfigError(format!("Failed to parse config file '{}': {}", path, e))
    })?;

    Ok(config)
}

pub struct AppState {
    pub config: ListenerConfig,
    pub http_client: reqwest::Client,
}

pub type SharedState = Arc<AppState>;
