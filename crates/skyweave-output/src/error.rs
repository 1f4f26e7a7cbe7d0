//! Output resolution error types

use std::time::Duration;
use thiserror::Error;

/// Errors carried by a failed output
///
/// Errors are `Clone` because a single failure is handed to every value
/// derived from the failing one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    #[error("Output resolution failed: {0}")]
    Failed(String),

    #[error("Output was abandoned before it resolved")]
    Abandoned,

    #[error("Output did not resolve within {0:?}")]
    Timeout(Duration),
}

impl OutputError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
