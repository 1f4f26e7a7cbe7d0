//! The static website stack

use crate::config::WebsiteConfig;
use skyweave_azure::{
    AccessTier, Blob, BlobArgs, Encryption, FileAsset, Kind, ListStorageAccountKeysArgs,
    MinimumTlsVersion, NetworkRuleSet, ResourceGroup, ResourceGroupArgs, SkuName,
    StorageAccount, StorageAccountArgs, StorageAccountStaticWebsite,
    StorageAccountStaticWebsiteArgs, list_storage_account_keys,
};
use skyweave_deploy::{DeploymentContext, Result, Stack};
use skyweave_output::Output;

pub const RESOURCE_GROUP: &str = "resourceGroup";
pub const STORAGE_ACCOUNT: &str = "sa";
pub const STATIC_WEBSITE: &str = "staticWebsite";
pub const INDEX_DOCUMENT: &str = "index.html";

/// A storage account serving `index.html` as a static website
///
/// Exports the account's primary access key and the website URL.
#[derive(Debug, Clone)]
pub struct StaticWebsiteStack {
    /// First key of the storage account; always secret
    pub primary_storage_key: Output<String>,

    /// `primaryEndpoints.web` of the storage account
    pub web_endpoint: Output<String>,
}

impl Stack for StaticWebsiteStack {
    fn declare(ctx: &DeploymentContext) -> Result<Self> {
        let config = WebsiteConfig::load(ctx.config())?;
        tracing::debug!(
            environment = %config.environment,
            resource_group = %config.resource_group_name,
            storage_account = %config.storage_account_name,
            "Declaring static website"
        );

        let resource_group = ResourceGroup::new(
            ctx,
            RESOURCE_GROUP,
            ResourceGroupArgs::new()
                .with_name(config.resource_group_name.as_str())
                .with_tag("environment", config.environment.as_str()),
        )?;

        let storage_account = StorageAccount::new(
            ctx,
            STORAGE_ACCOUNT,
            StorageAccountArgs::new(resource_group.name(), SkuName::StandardLrs, Kind::StorageV2)
                .with_account_name(config.storage_account_name.as_str())
                .with_access_tier(AccessTier::Hot)
                .with_minimum_tls_version(MinimumTlsVersion::Tls1_2)
                .with_https_traffic_only(true)
                .with_blob_public_access(true)
                .with_encryption(Encryption::microsoft_managed())
                .with_network_rule_set(NetworkRuleSet::allow_all())
                .with_tag("environment", config.environment.as_str()),
        )?;

        let keys = list_storage_account_keys(
            ctx,
            ListStorageAccountKeysArgs::new(storage_account.name(), resource_group.name()),
        );
        let primary_storage_key = keys
            .try_apply(|keys| {
                keys.primary_key()
                    .map(str::to_string)
                    .ok_or("storage account reported no access keys")
            })
            .into_secret();

        let static_website = StorageAccountStaticWebsite::new(
            ctx,
            STATIC_WEBSITE,
            StorageAccountStaticWebsiteArgs::new(storage_account.name(), resource_group.name())
                .with_index_document(INDEX_DOCUMENT),
        )?;

        Blob::new(
            ctx,
            INDEX_DOCUMENT,
            BlobArgs::new(
                resource_group.name(),
                storage_account.name(),
                static_website.container_name(),
            )
            .with_source(FileAsset::new(INDEX_DOCUMENT))
            .with_content_type("text/html"),
        )?;

        Ok(Self {
            primary_storage_key,
            web_endpoint: storage_account.web_endpoint(),
        })
    }
}
