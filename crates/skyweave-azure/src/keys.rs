//! Storage account access keys

use crate::tokens;
use serde::{Deserialize, Serialize};
use skyweave_deploy::{DeploymentContext, Input, Inputs};
use skyweave_engine::Value;
use skyweave_output::Output;

#[derive(Debug, Clone)]
pub struct ListStorageAccountKeysArgs {
    pub account_name: Input,
    pub resource_group_name: Input,
    /// Set to `"kerb"` to include Kerberos keys
    pub expand: Option<String>,
}

impl ListStorageAccountKeysArgs {
    pub fn new(account_name: impl Into<Input>, resource_group_name: impl Into<Input>) -> Self {
        Self {
            account_name: account_name.into(),
            resource_group_name: resource_group_name.into(),
            expand: None,
        }
    }

    fn into_inputs(self) -> Inputs {
        Inputs::new()
            .set("accountName", self.account_name)
            .set("resourceGroupName", self.resource_group_name)
            .set_opt("expand", self.expand)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAccountKey {
    pub value: String,
    pub key_name: Option<String>,
    pub permissions: Option<String>,
    pub creation_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStorageAccountKeysResult {
    #[serde(default)]
    pub keys: Vec<StorageAccountKey>,
}

impl ListStorageAccountKeysResult {
    /// Value of the first key, the account's primary key
    pub fn primary_key(&self) -> Option<&str> {
        self.keys.first().map(|k| k.value.as_str())
    }
}

/// List the access keys of a storage account
///
/// The result carries credentials; wrap anything derived from it with
/// [`Output::as_secret`] before exporting it.
pub fn list_storage_account_keys(
    ctx: &DeploymentContext,
    args: ListStorageAccountKeysArgs,
) -> Output<ListStorageAccountKeysResult> {
    ctx.invoke(tokens::LIST_STORAGE_ACCOUNT_KEYS, args.into_inputs())
        .try_apply(|outputs| serde_json::from_value(Value::Object(outputs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_parses_partial_keys() {
        let result: ListStorageAccountKeysResult =
            serde_json::from_value(json!({ "keys": [{ "value": "k1" }, { "value": "k2", "keyName": "key2" }] }))
                .unwrap();
        assert_eq!(result.primary_key(), Some("k1"));
        assert_eq!(result.keys[1].key_name.as_deref(), Some("key2"));
    }

    #[test]
    fn test_missing_keys_means_no_primary_key() {
        let result: ListStorageAccountKeysResult = serde_json::from_value(json!({})).unwrap();
        assert!(result.primary_key().is_none());
    }
}
