//! Enumerations and nested argument types shared by the storage resources

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage SKU name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuName {
    #[serde(rename = "Standard_LRS")]
    StandardLrs,
    #[serde(rename = "Standard_GRS")]
    StandardGrs,
    #[serde(rename = "Standard_RAGRS")]
    StandardRagrs,
    #[serde(rename = "Standard_ZRS")]
    StandardZrs,
    #[serde(rename = "Premium_LRS")]
    PremiumLrs,
}

/// Storage SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub name: SkuName,
}

impl From<SkuName> for Sku {
    fn from(name: SkuName) -> Self {
        Self { name }
    }
}

/// Storage account kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Storage,
    StorageV2,
    BlobStorage,
    FileStorage,
    BlockBlobStorage,
}

/// Blob access tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessTier {
    Hot,
    Cool,
    Premium,
}

/// Minimum TLS version accepted by the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinimumTlsVersion {
    #[serde(rename = "TLS1_0")]
    Tls1_0,
    #[serde(rename = "TLS1_1")]
    Tls1_1,
    #[serde(rename = "TLS1_2")]
    Tls1_2,
}

impl fmt::Display for MinimumTlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimumTlsVersion::Tls1_0 => write!(f, "TLS1_0"),
            MinimumTlsVersion::Tls1_1 => write!(f, "TLS1_1"),
            MinimumTlsVersion::Tls1_2 => write!(f, "TLS1_2"),
        }
    }
}

/// Service encryption settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encryption {
    pub key_source: String,
    #[serde(default)]
    pub services: EncryptionServices,
}

impl Encryption {
    /// Microsoft-managed keys for blob and file services
    pub fn microsoft_managed() -> Self {
        Self {
            key_source: "Microsoft.Storage".to_string(),
            services: EncryptionServices {
                blob: Some(EncryptionService::account_key()),
                file: Some(EncryptionService::account_key()),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionServices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<EncryptionService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<EncryptionService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionService {
    pub enabled: bool,
    pub key_type: String,
}

impl EncryptionService {
    pub fn account_key() -> Self {
        Self {
            enabled: true,
            key_type: "Account".to_string(),
        }
    }
}

/// Network access rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRuleSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass: Option<String>,
    pub default_action: DefaultAction,
}

impl NetworkRuleSet {
    /// Allow all traffic, letting Azure services bypass the rules
    pub fn allow_all() -> Self {
        Self {
            bypass: Some("AzureServices".to_string()),
            default_action: DefaultAction::Allow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultAction {
    Allow,
    Deny,
}

/// Service endpoints reported by a storage account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    #[serde(default)]
    pub blob: Option<String>,
    #[serde(default)]
    pub dfs: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub web: Option<String>,
}
