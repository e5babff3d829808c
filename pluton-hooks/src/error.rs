//! Error types for the hook layer.

use pluton_engine::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
