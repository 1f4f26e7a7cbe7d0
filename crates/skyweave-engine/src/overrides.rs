//! Token-keyed override tables for the mock engine
//!
//! Each entry is a pure function that adjusts the outputs synthesized for a
//! request of one type (resources) or token (function calls). The default
//! tables are immutable process-wide data.

use crate::request::{CallRequest, PropertyMap, ResourceRequest};
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Type and function tokens with built-in overrides
pub mod tokens {
    pub const STORAGE_ACCOUNT: &str = "azure-native:storage:StorageAccount";
    pub const BLOB: &str = "azure-native:storage:Blob";
    pub const LIST_STORAGE_ACCOUNT_KEYS: &str = "azure-native:storage:listStorageAccountKeys";
}

/// Key listing returned for every storage-account keys call
pub const MOCK_STORAGE_KEY: &str = "valueKeyStorage";

pub type OverrideFn<R> = Arc<dyn Fn(&R, &mut PropertyMap) + Send + Sync>;

/// Mapping from token to output override
pub struct OverrideTable<R> {
    entries: HashMap<String, OverrideFn<R>>,
}

impl<R> OverrideTable<R> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert<F>(&mut self, token: impl Into<String>, f: F)
    where
        F: Fn(&R, &mut PropertyMap) + Send + Sync + 'static,
    {
        self.entries.insert(token.into(), Arc::new(f));
    }

    /// Apply the override registered for `token`, if any.
    ///
    /// Returns whether an override matched.
    pub fn apply(&self, token: &str, request: &R, outputs: &mut PropertyMap) -> bool {
        match self.entries.get(token) {
            Some(f) => {
                f(request, outputs);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<R> Default for OverrideTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for OverrideTable<R> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<R> fmt::Debug for OverrideTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<&str> = self.tokens().collect();
        tokens.sort_unstable();
        f.debug_struct("OverrideTable").field("tokens", &tokens).finish()
    }
}

/// Built-in resource overrides
pub static RESOURCE_OVERRIDES: LazyLock<Arc<OverrideTable<ResourceRequest>>> =
    LazyLock::new(|| {
        let mut table = OverrideTable::new();
        table.insert(tokens::BLOB, strip_asset_source);
        table.insert(tokens::STORAGE_ACCOUNT, synthesize_primary_endpoints);
        Arc::new(table)
    });

/// Built-in function call overrides
pub static CALL_OVERRIDES: LazyLock<Arc<OverrideTable<CallRequest>>> = LazyLock::new(|| {
    let mut table = OverrideTable::new();
    table.insert(tokens::LIST_STORAGE_ACCOUNT_KEYS, list_storage_account_keys);
    Arc::new(table)
});

/// Assets cannot travel through the engine, so blobs lose their `source`.
pub fn strip_asset_source(_request: &ResourceRequest, outputs: &mut PropertyMap) {
    outputs.remove("source");
}

/// The web endpoint is normally computed by the cloud backend.
pub fn synthesize_primary_endpoints(request: &ResourceRequest, outputs: &mut PropertyMap) {
    outputs.insert(
        "primaryEndpoints".to_string(),
        json!({ "web": format!("https://{}.web.core.windows.net", request.logical_name) }),
    );
}

pub fn list_storage_account_keys(_request: &CallRequest, outputs: &mut PropertyMap) {
    outputs.insert("keys".to_string(), json!([{ "value": MOCK_STORAGE_KEY }]));
}
