//! Provisioning engine error types

use thiserror::Error;

/// Provisioning engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
