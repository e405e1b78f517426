use std::io;

/// Custom error type for nexus_listener operations
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Payload parse error: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Helper type for Results that use ListenerError
pub type Result<T> = std::result::Result<T, ListenerError>;
