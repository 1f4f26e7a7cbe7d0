//! Stack configuration
//!
//! A [`StackConfig`] is built once at program entry and passed by reference
//! to whatever declares resources. Keys are looked up project-namespaced
//! first (`website:environment`), then bare (`environment`).

pub mod error;

pub use error::*;

use serde::Deserialize;
use serde_json::Value;
use skyweave_output::Output;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Environment variable holding a JSON object of configuration values
pub const CONFIG_ENV: &str = "SKYWEAVE_CONFIG";

/// Environment variable pointing directly at a stack file
pub const STACK_FILE_ENV: &str = "SKYWEAVE_STACK_FILE";

/// Configuration values for one stack of one project
#[derive(Debug, Clone, Default)]
pub struct StackConfig {
    project: String,
    values: BTreeMap<String, String>,
    secret_keys: BTreeSet<String>,
}

/// Raw stack file
#[derive(Debug, Deserialize)]
struct StackFile {
    #[serde(default)]
    config: BTreeMap<String, RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Secret { secret: Value },
    Plain(Value),
}

impl StackConfig {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.secret_keys.insert(key.clone());
        self.values.insert(key, value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Load values from the JSON object in `SKYWEAVE_CONFIG`
    ///
    /// An unset variable yields an empty configuration.
    pub fn from_env(project: impl Into<String>) -> Result<Self> {
        let mut config = Self::new(project);
        if let Ok(raw) = std::env::var(CONFIG_ENV) {
            let values: BTreeMap<String, Value> = serde_json::from_str(&raw)?;
            for (key, value) in values {
                let rendered = render(&key, &value)?;
                config.values.insert(key, rendered);
            }
            tracing::debug!(count = config.values.len(), "Loaded config from environment");
        }
        Ok(config)
    }

    /// Parse a stack file with a top-level `config:` mapping
    ///
    /// A value written as `{ secret: ... }` is flagged secret.
    pub fn from_yaml_str(project: impl Into<String>, content: &str) -> Result<Self> {
        let file: StackFile = serde_yaml::from_str(content)?;
        let mut config = Self::new(project);
        for (key, raw) in file.config {
            match raw {
                RawValue::Secret { secret } => {
                    let rendered = render(&key, &secret)?;
                    config = config.with_secret(key, rendered);
                }
                RawValue::Plain(value) => {
                    let rendered = render(&key, &value)?;
                    config.values.insert(key, rendered);
                }
            }
        }
        Ok(config)
    }

    pub fn from_yaml_file(project: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(project, &content)?;
        tracing::debug!(path = %path.display(), count = config.values.len(), "Loaded stack file");
        Ok(config)
    }

    /// Overlay `other` on top of this configuration
    ///
    /// An overlaid key replaces both its bare and its namespaced form, and
    /// takes its secrecy from `other`.
    pub fn merge(mut self, other: StackConfig) -> Self {
        for (key, value) in other.values {
            let alias = self.alias(&key);
            self.values.remove(&alias);
            self.secret_keys.remove(&alias);
            if other.secret_keys.contains(&key) {
                self.secret_keys.insert(key.clone());
            } else {
                self.secret_keys.remove(&key);
            }
            self.values.insert(key, value);
        }
        self
    }

    /// The other spelling of `key`: bare for a namespaced key and vice versa
    fn alias(&self, key: &str) -> String {
        match key
            .strip_prefix(self.project.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
        {
            Some(bare) => bare.to_string(),
            None => format!("{}:{}", self.project, key),
        }
    }

    fn resolve_key(&self, key: &str) -> Option<&str> {
        let namespaced = format!("{}:{}", self.project, key);
        if self.values.contains_key(&namespaced) {
            return self.values.get_key_value(&namespaced).map(|(k, _)| k.as_str());
        }
        self.values.get_key_value(key).map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.resolve_key(key)
            .and_then(|k| self.values.get(k))
            .map(String::as_str)
    }

    /// Look up a value that must be present
    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingRequired {
                project: self.project.clone(),
                key: key.to_string(),
            })
    }

    /// Look up a required value and wrap it as a secret output
    pub fn require_secret(&self, key: &str) -> Result<Output<String>> {
        self.require(key).map(Output::secret)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected true or false, got '{}'", raw),
            }),
        }
    }

    /// Whether the stored value was flagged secret
    pub fn is_secret(&self, key: &str) -> bool {
        self.resolve_key(key)
            .is_some_and(|k| self.secret_keys.contains(k))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render a configuration value as the string a program reads
fn render(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "value is null".to_string(),
        }),
        other => Ok(serde_json::to_string(other)?),
    }
}

/// Find the stack file for `stack`
///
/// Lookup order:
/// 1. `SKYWEAVE_STACK_FILE` environment variable
/// 2. current directory: `Skyweave.{stack}.yaml`
/// 3. `./.skyweave/` directory
/// 4. `~/.config/skyweave/Skyweave.{stack}.yaml`
pub fn find_stack_file(stack: &str) -> Result<PathBuf> {
    if let Ok(path) = std::env::var(STACK_FILE_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
    }

    let filename = format!("Skyweave.{}.yaml", stack);
    let current_dir = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    let candidates = [
        current_dir.join(&filename),
        current_dir.join(".skyweave").join(&filename),
    ];
    for path in candidates {
        if path.exists() {
            return Ok(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("skyweave").join(&filename);
        if global.exists() {
            return Ok(global);
        }
    }

    Err(ConfigError::StackFileNotFound {
        stack: stack.to_string(),
    })
}
