//! Azure Native declarations for Skyweave
//!
//! Typed wrappers over [`DeploymentContext::register_resource`] and
//! [`DeploymentContext::invoke`] for the resources a static website needs.
//! Arguments are translated to the provider's camelCase property names;
//! outputs are read back from the engine's answer and deserialized with
//! serde.
//!
//! # Example
//!
//! ```ignore
//! use skyweave_azure::{ResourceGroup, ResourceGroupArgs};
//!
//! let group = ResourceGroup::new(
//!     ctx,
//!     "resourceGroup",
//!     ResourceGroupArgs::new().with_tag("environment", "dev"),
//! )?;
//! let name = group.name();
//! ```
//!
//! [`DeploymentContext::register_resource`]: skyweave_deploy::DeploymentContext::register_resource
//! [`DeploymentContext::invoke`]: skyweave_deploy::DeploymentContext::invoke

pub mod asset;
pub mod blob;
pub mod keys;
pub mod resource_group;
pub mod static_website;
pub mod storage_account;
pub mod tokens;
pub mod types;

pub use asset::FileAsset;
pub use blob::{Blob, BlobArgs};
pub use keys::{
    ListStorageAccountKeysArgs, ListStorageAccountKeysResult, StorageAccountKey,
    list_storage_account_keys,
};
pub use resource_group::{ResourceGroup, ResourceGroupArgs};
pub use static_website::{
    StorageAccountStaticWebsite, StorageAccountStaticWebsiteArgs, WEB_CONTAINER,
};
pub use storage_account::{StorageAccount, StorageAccountArgs};
pub use types::{
    AccessTier, DefaultAction, Encryption, Endpoints, Kind, MinimumTlsVersion, NetworkRuleSet,
    Sku, SkuName,
};
