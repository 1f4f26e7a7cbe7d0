//! Deployment error types

use skyweave_config::ConfigError;
use skyweave_engine::EngineError;
use skyweave_output::OutputError;
use thiserror::Error;

/// Deployment errors
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate resource: {urn}")]
    DuplicateResource { urn: String },

    #[error("Failed to register {urn}: {source}")]
    Registration {
        urn: String,
        #[source]
        source: Box<DeployError>,
    },

    #[error("Function call {token} failed: {source}")]
    Call {
        token: String,
        #[source]
        source: Box<DeployError>,
    },

    #[error("Program error: {0}")]
    Program(String),
}

impl DeployError {
    pub fn registration(urn: impl Into<String>, source: impl Into<DeployError>) -> Self {
        Self::Registration {
            urn: urn.into(),
            source: Box::new(source.into()),
        }
    }

    pub fn call(token: impl Into<String>, source: impl Into<DeployError>) -> Self {
        Self::Call {
            token: token.into(),
            source: Box::new(source.into()),
        }
    }

    /// URN of the resource whose registration failed, if any
    pub fn failed_urn(&self) -> Option<&str> {
        match self {
            Self::Registration { urn, .. } => Some(urn),
            _ => None,
        }
    }

    /// Token of the function call that failed, if any
    pub fn failed_call(&self) -> Option<&str> {
        match self {
            Self::Call { token, .. } => Some(token),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
