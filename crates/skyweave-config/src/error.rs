use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration variable '{project}:{key}'")]
    MissingRequired { project: String, key: String },

    #[error("Invalid value for configuration variable '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(
        "Stack file for '{stack}' not found. Looked in:\n\
        - SKYWEAVE_STACK_FILE environment variable\n\
        - current directory: Skyweave.{stack}.yaml\n\
        - ./.skyweave/ directory\n\
        - ~/.config/skyweave/Skyweave.{stack}.yaml"
    )]
    StackFileNotFound { stack: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
