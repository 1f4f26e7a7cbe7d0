//! Requests and responses exchanged with a provisioning engine

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Property value: string, boolean, number, list, map or null
pub type Value = serde_json::Value;

/// Named properties of a resource or function call
pub type PropertyMap = serde_json::Map<String, Value>;

/// Request to materialize a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    /// Resource kind (e.g., "azure-native:storage:Blob")
    pub type_token: String,

    /// Caller-chosen name of the declaration
    pub logical_name: String,

    /// Input properties
    pub inputs: PropertyMap,

    /// Identifier supplied by the caller, if any
    pub explicit_id: Option<String>,
}

impl ResourceRequest {
    pub fn new(
        type_token: impl Into<String>,
        logical_name: impl Into<String>,
        inputs: PropertyMap,
    ) -> Self {
        Self {
            type_token: type_token.into(),
            logical_name: logical_name.into(),
            inputs,
            explicit_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.explicit_id = Some(id.into());
        self
    }

    /// Reject requests with an empty type token or logical name.
    pub fn validate(&self) -> Result<()> {
        if self.type_token.trim().is_empty() {
            return Err(EngineError::MalformedRequest(format!(
                "resource '{}' has an empty type token",
                self.logical_name
            )));
        }
        if self.logical_name.trim().is_empty() {
            return Err(EngineError::MalformedRequest(format!(
                "resource of type '{}' has an empty logical name",
                self.type_token
            )));
        }
        Ok(())
    }
}

/// Engine answer to a [`ResourceRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceResponse {
    /// Engine-assigned identifier
    pub id: String,

    /// Output properties
    pub outputs: PropertyMap,
}

/// Request to invoke a provider function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Function token (e.g., "azure-native:storage:listStorageAccountKeys")
    pub token: String,

    /// Function arguments
    pub args: PropertyMap,
}

impl CallRequest {
    pub fn new(token: impl Into<String>, args: PropertyMap) -> Self {
        Self {
            token: token.into(),
            args,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(EngineError::MalformedRequest(
                "function call has an empty token".to_string(),
            ));
        }
        Ok(())
    }
}

/// Engine answer to a [`CallRequest`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallResponse {
    pub outputs: PropertyMap,
}
